use super::profile::FilerProfile;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

const MARRIED_STANDARD: Decimal = dec!(13000);
const MARRIED_ADDITIONAL: Decimal = dec!(1100);
const SINGLE_STANDARD: Decimal = dec!(6500);
const SINGLE_ADDITIONAL: Decimal = dec!(1400);
const SENIOR_AGE: u32 = 65;
/// Share of adjusted income that medical expenses must exceed
const MEDICAL_FLOOR_RATE: Decimal = dec!(0.075);

/// Which deduction the filer ends up claiming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeductionMethod {
    Standard,
    Itemized,
}

impl DeductionMethod {
    pub fn display(&self) -> &'static str {
        match self {
            DeductionMethod::Standard => "Standard",
            DeductionMethod::Itemized => "Itemized",
        }
    }
}

impl std::fmt::Display for DeductionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Itemized deduction components
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itemized {
    pub charitable: Decimal,
    pub mortgage_interest: Decimal,
    pub state_tax: Decimal,
    pub medical: Decimal,
}

impl Itemized {
    pub fn total(&self) -> Decimal {
        self.charitable + self.mortgage_interest + self.state_tax + self.medical
    }
}

/// Standard and itemized deductions side by side, with the one claimed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deductions {
    pub standard: Decimal,
    pub itemized: Itemized,
    pub method: DeductionMethod,
}

impl Deductions {
    pub fn calculate(profile: &FilerProfile) -> Self {
        let standard = standard_deduction(profile);
        let itemized = itemize(profile);

        // Itemize only when it strictly beats the standard deduction
        let method = if itemized.total() > standard {
            DeductionMethod::Itemized
        } else {
            DeductionMethod::Standard
        };
        log::debug!(
            "Deductions: standard={}, itemized={}, claiming {}",
            standard,
            itemized.total(),
            method
        );

        Deductions {
            standard,
            itemized,
            method,
        }
    }

    /// The deduction subtracted from income
    pub fn claimed(&self) -> Decimal {
        match self.method {
            DeductionMethod::Standard => self.standard,
            DeductionMethod::Itemized => self.itemized.total(),
        }
    }
}

/// Standard deduction by filing status, raised for blindness and age 65+.
/// Non-citizens get none.
pub fn standard_deduction(profile: &FilerProfile) -> Decimal {
    if !profile.american_citizen {
        return Decimal::ZERO;
    }

    if profile.married {
        let additions = [
            profile.blind,
            profile.spouse_blind,
            profile.age >= SENIOR_AGE,
            profile.spouse_age >= SENIOR_AGE,
        ]
        .into_iter()
        .filter(|&applies| applies)
        .count();
        MARRIED_STANDARD + MARRIED_ADDITIONAL * Decimal::from(additions)
    } else {
        let additions = [profile.blind, profile.age >= SENIOR_AGE]
            .into_iter()
            .filter(|&applies| applies)
            .count();
        SINGLE_STANDARD + SINGLE_ADDITIONAL * Decimal::from(additions)
    }
}

fn itemize(profile: &FilerProfile) -> Itemized {
    let charitable = profile.charitable_givings;
    let mortgage_interest = profile.mortgage_value;
    let state_tax = profile.state.deduction(profile.income);

    // Medical floor uses income less the other itemized amounts, which may go negative
    let adjusted_income = profile.income - (charitable + mortgage_interest + state_tax);
    let medical =
        (profile.medical_expenses - MEDICAL_FLOOR_RATE * adjusted_income).max(Decimal::ZERO);

    Itemized {
        charitable,
        mortgage_interest,
        state_tax,
        medical,
    }
}

/// Sum of charitable giving, mortgage interest, state tax and deductible medical expenses
#[allow(dead_code)]
pub fn itemized_deductions(profile: &FilerProfile) -> Decimal {
    itemize(profile).total()
}
