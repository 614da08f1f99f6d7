//! Average effective state income tax rates, used for the state/local tax deduction.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown jurisdiction: '{name}'")]
pub struct UnknownJurisdiction {
    pub name: String,
}

/// A state (or DC) with its average effective income tax rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Jurisdiction {
    pub name: &'static str,
    pub rate: Decimal,
}

impl Jurisdiction {
    /// State tax deductible for the given income
    pub fn deduction(&self, income: Decimal) -> Decimal {
        income * self.rate
    }
}

// Names are kept exactly as published in the source table, including "Tenenssee".
const STATE_TAX_RATES: &[(&str, Decimal)] = &[
    ("Alaska", dec!(0.0564)),
    ("Delaware", dec!(0.0670)),
    ("Montana", dec!(0.0689)),
    ("Wyoming", dec!(0.0743)),
    ("Nevada", dec!(0.0766)),
    ("Tenenssee", dec!(0.0797)),
    ("Idaho", dec!(0.0848)),
    ("California", dec!(0.0879)),
    ("South Carolina", dec!(0.0884)),
    ("Florida", dec!(0.0894)),
    ("Oregon", dec!(0.0922)),
    ("Utah", dec!(0.0925)),
    ("Colorado", dec!(0.0934)),
    ("Alabama", dec!(0.0943)),
    ("Arizona", dec!(0.0960)),
    ("South Dakota", dec!(0.0977)),
    ("Washington DC", dec!(0.10)),
    ("North Dakota", dec!(0.1003)),
    ("New Hampshire", dec!(0.1009)),
    ("Louisiana", dec!(0.1033)),
    ("Hawaii", dec!(0.1033)),
    ("West Virginia", dec!(0.1038)),
    ("Georgia", dec!(0.1057)),
    ("North Carolina", dec!(0.1063)),
    ("New Mexico", dec!(0.1073)),
    ("Oklahoma", dec!(0.1070)),
    ("Virginia", dec!(0.1089)),
    ("Vermont", dec!(0.1089)),
    ("Missouri", dec!(0.1102)),
    ("Texas", dec!(0.1112)),
    ("Massachusetts", dec!(0.1152)),
    ("Minnesota", dec!(0.1159)),
    ("Maine", dec!(0.1163)),
    ("Washington", dec!(0.1172)),
    ("Indiana", dec!(0.1187)),
    ("Maryland", dec!(0.1192)),
    ("Kentucky", dec!(0.1201)),
    ("Mississippi", dec!(0.1214)),
    ("Kansas", dec!(0.1228)),
    ("Arkansas", dec!(0.1228)),
    ("Pennsylvania", dec!(0.1233)),
    ("New Jersey", dec!(0.1263)),
    ("Iowa", dec!(0.1284)),
    ("Michigan", dec!(0.13)),
    ("Ohio", dec!(0.1306)),
    ("Connecticut", dec!(0.1356)),
    ("Rhode Island", dec!(0.1357)),
    ("New York", dec!(0.1358)),
    ("Wisconsin", dec!(0.1360)),
    ("Nebraska", dec!(0.1380)),
    ("Illinois", dec!(0.1476)),
];

/// Accepted alternate spellings, mapped to the table key
const ALIASES: &[(&str, &str)] = &[("Tennessee", "Tenenssee")];

/// All jurisdictions in table order
pub fn jurisdictions() -> impl Iterator<Item = Jurisdiction> {
    STATE_TAX_RATES
        .iter()
        .map(|&(name, rate)| Jurisdiction { name, rate })
}

/// Find a jurisdiction by name (trimmed, case-insensitive)
pub fn lookup(name: &str) -> Result<Jurisdiction, UnknownJurisdiction> {
    let wanted = name.trim();
    let key = ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(wanted))
        .map_or(wanted, |(_, key)| *key);

    jurisdictions()
        .find(|j| j.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| UnknownJurisdiction {
            name: name.to_string(),
        })
}

/// Amount a filer can deduct for the state income tax they pay
#[allow(dead_code)]
pub fn state_tax_deduction(state: &str, income: Decimal) -> Result<Decimal, UnknownJurisdiction> {
    lookup(state).map(|j| j.deduction(income))
}
