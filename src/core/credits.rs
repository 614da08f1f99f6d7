//! Earned income, child tax and American Opportunity credits.
//!
//! Each credit is a step function of AGI and household composition: a filer either
//! qualifies for the full amount or gets nothing.

use super::profile::FilerProfile;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Capital gains above this disqualify the filer from the earned income credit
const EITC_INVESTMENT_LIMIT: Decimal = dec!(3450);
const EITC_MIN_AGE: u32 = 25;
const EITC_MAX_AGE: u32 = 65;

/// Earned income credit tier for a number of dependents
struct EitcTier {
    married_limit: Decimal,
    single_limit: Decimal,
    credit: Decimal,
}

static EITC_TIERS: [EitcTier; 4] = [
    EitcTier {
        married_limit: dec!(20600),
        single_limit: dec!(15010),
        credit: dec!(487),
    },
    EitcTier {
        married_limit: dec!(45207),
        single_limit: dec!(39617),
        credit: dec!(3250),
    },
    EitcTier {
        married_limit: dec!(50597),
        single_limit: dec!(45007),
        credit: dec!(5372),
    },
    EitcTier {
        married_limit: dec!(53930),
        single_limit: dec!(48340),
        credit: dec!(6044),
    },
];

const CHILD_CREDIT_PER_CHILD: Decimal = dec!(1000);
const CHILD_CREDIT_MARRIED_LIMIT: Decimal = dec!(110000);
const CHILD_CREDIT_SINGLE_LIMIT: Decimal = dec!(75000);

const AOTC_PER_STUDENT: Decimal = dec!(2500);
const AOTC_MARRIED_LIMIT: Decimal = dec!(180000);
const AOTC_SINGLE_LIMIT: Decimal = dec!(80000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credits {
    pub earned_income: Decimal,
    pub child_tax: Decimal,
    pub american_opportunity: Decimal,
}

impl Credits {
    pub fn calculate(profile: &FilerProfile, agi: Decimal) -> Self {
        let credits = Credits {
            earned_income: earned_income_credit(profile, agi),
            child_tax: child_tax_credit(profile, agi),
            american_opportunity: american_opportunity_credit(profile, agi),
        };
        log::debug!(
            "Credits at AGI {}: eitc={}, child={}, aotc={}",
            agi,
            credits.earned_income,
            credits.child_tax,
            credits.american_opportunity
        );
        credits
    }

    pub fn total(&self) -> Decimal {
        self.american_opportunity + self.earned_income + self.child_tax
    }
}

/// Earned income tax credit, tiered by dependents (children in college included)
pub fn earned_income_credit(profile: &FilerProfile, agi: Decimal) -> Decimal {
    if !profile.employed
        || !profile.american_citizen
        || profile.capital_gains > EITC_INVESTMENT_LIMIT
    {
        return Decimal::ZERO;
    }

    let dependents = profile.dependents();
    // Without dependents only working-age filers qualify
    if dependents == 0 && !(EITC_MIN_AGE..=EITC_MAX_AGE).contains(&profile.age) {
        return Decimal::ZERO;
    }

    let tier = &EITC_TIERS[dependents.min(3) as usize];
    if agi > tier.married_limit || (!profile.married && agi > tier.single_limit) {
        Decimal::ZERO
    } else {
        tier.credit
    }
}

/// $1,000 per child not in college, below an AGI cliff
pub fn child_tax_credit(profile: &FilerProfile, agi: Decimal) -> Decimal {
    let limit = if profile.married {
        CHILD_CREDIT_MARRIED_LIMIT
    } else {
        CHILD_CREDIT_SINGLE_LIMIT
    };
    if agi < limit {
        CHILD_CREDIT_PER_CHILD * Decimal::from(profile.children)
    } else {
        Decimal::ZERO
    }
}

/// $2,500 per child in college, up to an AGI cliff
pub fn american_opportunity_credit(profile: &FilerProfile, agi: Decimal) -> Decimal {
    let limit = if profile.married {
        AOTC_MARRIED_LIMIT
    } else {
        AOTC_SINGLE_LIMIT
    };
    if agi > limit {
        Decimal::ZERO
    } else {
        AOTC_PER_STUDENT * Decimal::from(profile.children_in_college)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::test_profile;

    fn worker() -> FilerProfile {
        FilerProfile {
            employed: true,
            ..test_profile()
        }
    }

    #[test]
    fn eitc_requires_employment_and_citizenship() {
        assert_eq!(earned_income_credit(&test_profile(), dec!(10000)), Decimal::ZERO);

        let non_citizen = FilerProfile {
            american_citizen: false,
            ..worker()
        };
        assert_eq!(earned_income_credit(&non_citizen, dec!(10000)), Decimal::ZERO);

        assert_eq!(earned_income_credit(&worker(), dec!(10000)), dec!(487));
    }

    #[test]
    fn eitc_investment_income_limit() {
        let at_limit = FilerProfile {
            capital_gains: dec!(3450),
            ..worker()
        };
        assert_eq!(earned_income_credit(&at_limit, dec!(10000)), dec!(487));

        let over_limit = FilerProfile {
            capital_gains: dec!(3450.01),
            ..worker()
        };
        assert_eq!(earned_income_credit(&over_limit, dec!(10000)), Decimal::ZERO);
    }

    #[test]
    fn eitc_no_dependents_age_window() {
        for (age, expected) in [
            (24, Decimal::ZERO),
            (25, dec!(487)),
            (65, dec!(487)),
            (66, Decimal::ZERO),
        ] {
            let profile = FilerProfile { age, ..worker() };
            assert_eq!(earned_income_credit(&profile, dec!(10000)), expected, "age {age}");
        }
    }

    #[test]
    fn eitc_age_window_ignored_with_dependents() {
        let young_parent = FilerProfile {
            age: 20,
            children: 1,
            ..worker()
        };
        assert_eq!(earned_income_credit(&young_parent, dec!(10000)), dec!(3250));
    }

    #[test]
    fn eitc_single_limits_are_inclusive() {
        let cases = [
            (0, dec!(15010), dec!(487)),
            (1, dec!(39617), dec!(3250)),
            (2, dec!(45007), dec!(5372)),
            (3, dec!(48340), dec!(6044)),
        ];
        for (dependents, limit, credit) in cases {
            let profile = FilerProfile {
                children: dependents,
                ..worker()
            };
            assert_eq!(earned_income_credit(&profile, limit), credit);
            assert_eq!(
                earned_income_credit(&profile, limit + dec!(0.01)),
                Decimal::ZERO
            );
        }
    }

    #[test]
    fn eitc_married_limits_are_inclusive() {
        let cases = [
            (0, dec!(20600), dec!(487)),
            (1, dec!(45207), dec!(3250)),
            (2, dec!(50597), dec!(5372)),
            (3, dec!(53930), dec!(6044)),
        ];
        for (dependents, limit, credit) in cases {
            let profile = FilerProfile {
                married: true,
                children_in_college: dependents,
                ..worker()
            };
            assert_eq!(earned_income_credit(&profile, limit), credit);
            assert_eq!(earned_income_credit(&profile, limit + dec!(1)), Decimal::ZERO);
        }
    }

    #[test]
    fn eitc_counts_college_children_and_caps_tier() {
        let mixed = FilerProfile {
            children: 1,
            children_in_college: 1,
            ..worker()
        };
        assert_eq!(earned_income_credit(&mixed, dec!(30000)), dec!(5372));

        let large = FilerProfile {
            children: 7,
            ..worker()
        };
        assert_eq!(earned_income_credit(&large, dec!(30000)), dec!(6044));
    }

    #[test]
    fn eitc_is_flat_within_tier() {
        let profile = FilerProfile {
            children: 2,
            ..worker()
        };
        let low = earned_income_credit(&profile, Decimal::ZERO);
        let high = earned_income_credit(&profile, dec!(45007));
        assert_eq!(low, high);
    }

    #[test]
    fn child_credit_cliff_is_exclusive() {
        let single = FilerProfile {
            children: 2,
            children_in_college: 3,
            ..test_profile()
        };
        assert_eq!(child_tax_credit(&single, dec!(74999.99)), dec!(2000));
        assert_eq!(child_tax_credit(&single, dec!(75000)), Decimal::ZERO);

        let married = FilerProfile {
            married: true,
            ..single
        };
        assert_eq!(child_tax_credit(&married, dec!(75000)), dec!(2000));
        assert_eq!(child_tax_credit(&married, dec!(110000)), Decimal::ZERO);
    }

    #[test]
    fn aotc_cliff_is_inclusive() {
        let single = FilerProfile {
            children: 4,
            children_in_college: 2,
            ..test_profile()
        };
        assert_eq!(american_opportunity_credit(&single, dec!(80000)), dec!(5000));
        assert_eq!(american_opportunity_credit(&single, dec!(80001)), Decimal::ZERO);

        let married = FilerProfile {
            married: true,
            ..single
        };
        assert_eq!(american_opportunity_credit(&married, dec!(180000)), dec!(5000));
        assert_eq!(american_opportunity_credit(&married, dec!(180001)), Decimal::ZERO);
    }

    #[test]
    fn total_sums_all_three() {
        let profile = FilerProfile {
            employed: true,
            married: true,
            age: 40,
            children: 1,
            children_in_college: 1,
            ..test_profile()
        };
        let credits = Credits::calculate(&profile, dec!(40000));
        assert_eq!(credits.earned_income, dec!(5372));
        assert_eq!(credits.child_tax, dec!(1000));
        assert_eq!(credits.american_opportunity, dec!(2500));
        assert_eq!(credits.total(), dec!(8872));
    }
}
