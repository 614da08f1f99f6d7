use super::deductions::Deductions;
use super::profile::FilerProfile;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const EXEMPTION_PER_PERSON: Decimal = dec!(4150);
/// Above this AGI no filer may claim the exemption
const PHASE_OUT_ALL: Decimal = dec!(462000);
/// Above this AGI unmarried filers may not claim the exemption
const PHASE_OUT_SINGLE: Decimal = dec!(380750);

/// Income less the claimed deduction, never negative
pub fn adjusted_gross_income(profile: &FilerProfile, deductions: &Deductions) -> Decimal {
    (profile.income - deductions.claimed()).max(Decimal::ZERO)
}

/// Per-person exemption for filer, spouse and all dependents, phased out at high AGI
pub fn personal_exemption(profile: &FilerProfile, agi: Decimal) -> Decimal {
    if agi > PHASE_OUT_ALL || (agi > PHASE_OUT_SINGLE && !profile.married) {
        log::debug!("Personal exemption phased out at AGI {}", agi);
        return Decimal::ZERO;
    }

    let people = Decimal::from(profile.household_adults())
        + Decimal::from(profile.children)
        + Decimal::from(profile.children_in_college);
    people * EXEMPTION_PER_PERSON
}
