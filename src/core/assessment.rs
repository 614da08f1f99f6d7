//! Full tax computation for one filer.
//!
//! [`assess`] runs every stage once, in dependency order:
//! deductions → AGI → personal exemption → credits → taxable income → bracket tax.
//! AGI is computed a single time and handed to each stage that needs it.

use super::credits::Credits;
use super::deductions::{self, Deductions};
use super::exemption;
use super::profile::FilerProfile;
use super::schedule::{Bracket, Schedule};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub deductions: Deductions,
    pub agi: Decimal,
    pub personal_exemption: Decimal,
    pub credits: Credits,
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub income_tax_bracket: Bracket,
    pub capital_gains_tax: Decimal,
    /// Negative when the government owes the filer
    pub total_tax_burden: Decimal,
}

impl Assessment {
    pub fn is_refund(&self) -> bool {
        self.total_tax_burden < Decimal::ZERO
    }

    pub fn marginal_rate(&self) -> Decimal {
        self.income_tax_bracket.rate
    }
}

/// Compute every intermediate value and the final tax burden for a profile
pub fn assess(profile: &FilerProfile) -> Assessment {
    let deductions = Deductions::calculate(profile);
    let agi = exemption::adjusted_gross_income(profile, &deductions);
    let personal_exemption = exemption::personal_exemption(profile, agi);
    let credits = Credits::calculate(profile, agi);

    let taxable_income = (agi - personal_exemption).max(Decimal::ZERO);
    let ordinary = Schedule::ordinary(profile.married);
    let income_tax = ordinary.tax(taxable_income);
    let income_tax_bracket = ordinary.bracket_for(taxable_income);
    let capital_gains_tax = Schedule::capital_gains(profile.married).tax(profile.capital_gains);

    let total_tax_burden = income_tax + capital_gains_tax - credits.total();
    log::debug!(
        "AGI={}, exemption={}, taxable={}, income tax={} @ {}, capital gains tax={}, total={}",
        agi,
        personal_exemption,
        taxable_income,
        income_tax,
        income_tax_bracket.rate,
        capital_gains_tax,
        total_tax_burden
    );

    Assessment {
        deductions,
        agi,
        personal_exemption,
        credits,
        taxable_income,
        income_tax,
        income_tax_bracket,
        capital_gains_tax,
        total_tax_burden,
    }
}

#[allow(dead_code)]
pub fn standard_deduction(profile: &FilerProfile) -> Decimal {
    deductions::standard_deduction(profile)
}

#[allow(dead_code)]
pub fn itemized_deductions(profile: &FilerProfile) -> Decimal {
    deductions::itemized_deductions(profile)
}

/// Adjusted gross income: income less the larger of the standard and itemized deductions
#[allow(dead_code)]
pub fn agi(profile: &FilerProfile) -> Decimal {
    exemption::adjusted_gross_income(profile, &Deductions::calculate(profile))
}

#[allow(dead_code)]
pub fn personal_exemption(profile: &FilerProfile) -> Decimal {
    exemption::personal_exemption(profile, agi(profile))
}

/// Sum of the earned income, child tax and American Opportunity credits
#[allow(dead_code)]
pub fn credits(profile: &FilerProfile) -> Decimal {
    Credits::calculate(profile, agi(profile)).total()
}

/// Total federal tax owed; negative means a net payment to the filer
#[allow(dead_code)]
pub fn tax_burden(profile: &FilerProfile) -> Decimal {
    assess(profile).total_tax_burden
}
