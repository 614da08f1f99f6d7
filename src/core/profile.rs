use super::states::{self, Jurisdiction, UnknownJurisdiction};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use rust_decimal_macros::dec;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io::Read;
use ustax_derive::InputSchema;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: Decimal },
    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: &'static str, value: i64 },
    #[error("{field} is out of range (got {value})")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("{field} exceeds the largest supported amount of {max} (got {value})")]
    AmountTooLarge {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },
    #[error("state: {0}")]
    UnknownState(#[from] UnknownJurisdiction),
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl ProfileError {
    /// Name of the input field at fault, when one can be identified
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ProfileError::NegativeAmount { field, .. }
            | ProfileError::NegativeValue { field, .. }
            | ProfileError::OutOfRange { field, .. }
            | ProfileError::AmountTooLarge { field, .. } => Some(field),
            ProfileError::UnknownState(_) => Some("state"),
            ProfileError::Malformed(_) => None,
        }
    }
}

/// Description of one input field, generated from the doc comments on [`FilerInput`]
#[derive(Debug, Clone, Copy)]
pub struct InputField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Filer profile as supplied by the user (JSON object or CSV row).
///
/// Counts and ages are signed here so that negative values can be reported
/// against their field instead of failing to parse.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, InputSchema)]
#[serde(deny_unknown_fields)]
pub struct FilerInput {
    /// Filing jointly with a spouse
    pub married: bool,
    /// Filer is a US citizen
    pub american_citizen: bool,
    /// Filer has earned income from employment
    pub employed: bool,
    /// Filer is blind
    pub blind: bool,
    /// Spouse is blind (ignored when unmarried)
    pub spouse_blind: bool,
    /// Filer age in years
    pub age: i64,
    /// Spouse age in years (ignored when unmarried)
    pub spouse_age: i64,
    /// Dependent children not in college
    pub children: i64,
    /// Dependent children in college
    pub children_in_college: i64,
    /// Gross income in USD
    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64")]
    pub income: Decimal,
    /// Capital gains in USD
    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64")]
    pub capital_gains: Decimal,
    /// Charitable donations in USD
    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64")]
    pub charitable_givings: Decimal,
    /// Mortgage interest paid in USD
    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64")]
    pub mortgage_value: Decimal,
    /// Medical expenses in USD
    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64")]
    pub medical_expenses: Decimal,
    /// State of residence (e.g. "Texas", "Washington DC")
    pub state: String,
}

impl FilerInput {
    /// Every problem with this input, in field order
    pub fn issues(&self) -> Vec<ProfileError> {
        let mut issues = Vec::new();

        let counts = [
            ("age", self.age),
            ("spouse_age", self.spouse_age),
            ("children", self.children),
            ("children_in_college", self.children_in_college),
        ];
        for (field, value) in counts {
            if let Err(e) = to_count(field, value) {
                issues.push(e);
            }
        }

        let amounts = [
            ("income", self.income),
            ("capital_gains", self.capital_gains),
            ("charitable_givings", self.charitable_givings),
            ("mortgage_value", self.mortgage_value),
            ("medical_expenses", self.medical_expenses),
        ];
        for (field, value) in amounts {
            if let Err(e) = to_amount(field, value) {
                issues.push(e);
            }
        }

        if let Err(e) = states::lookup(&self.state) {
            issues.push(e.into());
        }

        issues
    }

    /// Check all fields and resolve the state, producing a profile the calculator accepts
    pub fn validate(&self) -> Result<FilerProfile, ProfileError> {
        Ok(FilerProfile {
            married: self.married,
            american_citizen: self.american_citizen,
            employed: self.employed,
            blind: self.blind,
            spouse_blind: self.spouse_blind,
            age: to_count("age", self.age)?,
            spouse_age: to_count("spouse_age", self.spouse_age)?,
            children: to_count("children", self.children)?,
            children_in_college: to_count("children_in_college", self.children_in_college)?,
            income: to_amount("income", self.income)?,
            capital_gains: to_amount("capital_gains", self.capital_gains)?,
            charitable_givings: to_amount("charitable_givings", self.charitable_givings)?,
            mortgage_value: to_amount("mortgage_value", self.mortgage_value)?,
            medical_expenses: to_amount("medical_expenses", self.medical_expenses)?,
            state: states::lookup(&self.state)?,
        })
    }
}

fn to_count(field: &'static str, value: i64) -> Result<u32, ProfileError> {
    if value < 0 {
        return Err(ProfileError::NegativeValue { field, value });
    }
    u32::try_from(value).map_err(|_| ProfileError::OutOfRange { field, value })
}

/// Amounts above this are rejected so that no step of the calculation can overflow
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

fn to_amount(field: &'static str, value: Decimal) -> Result<Decimal, ProfileError> {
    if value < Decimal::ZERO {
        Err(ProfileError::NegativeAmount { field, value })
    } else if value > MAX_AMOUNT {
        Err(ProfileError::AmountTooLarge {
            field,
            value,
            max: MAX_AMOUNT,
        })
    } else {
        Ok(value)
    }
}

/// Accept an amount however the source spells it: JSON numbers, CSV cells
/// inferred as integers of any width or as floats, and decimal strings.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> de::Visitor<'de> for AmountVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a decimal amount")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            v.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(v))
                .map_err(|_| E::custom(format!("invalid amount '{}'", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Decimal::from(v))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
            Decimal::try_from_i128_with_scale(v, 0)
                .map_err(|_| E::custom(format!("amount {} is too large", v)))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
            match i128::try_from(v) {
                Ok(v) => self.visit_i128(v),
                Err(_) => Err(E::custom(format!("amount {} is too large", v))),
            }
        }

        // Shortest round-trip text, so 1200.5 stays 1200.5
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            self.visit_str(&v.to_string())
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// A validated filer profile. Immutable input to one tax computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilerProfile {
    pub married: bool,
    pub american_citizen: bool,
    pub employed: bool,
    pub blind: bool,
    pub spouse_blind: bool,
    pub age: u32,
    pub spouse_age: u32,
    pub children: u32,
    pub children_in_college: u32,
    pub income: Decimal,
    pub capital_gains: Decimal,
    pub charitable_givings: Decimal,
    pub mortgage_value: Decimal,
    pub medical_expenses: Decimal,
    pub state: Jurisdiction,
}

impl FilerProfile {
    /// Dependents counted for the earned income credit
    pub fn dependents(&self) -> u32 {
        self.children.saturating_add(self.children_in_college)
    }

    /// Filer plus spouse when married
    pub fn household_adults(&self) -> u32 {
        if self.married {
            2
        } else {
            1
        }
    }
}

/// One record read from an input file; parse failures are kept per record
pub type InputRecord = Result<FilerInput, ProfileError>;

/// Read filer inputs from CSV, one per row after the header
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<InputRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    // Fail the whole file on an unreadable header
    rdr.headers()?;
    let records = rdr
        .deserialize::<FilerInput>()
        .map(|r| r.map_err(|e| ProfileError::Malformed(e.to_string())))
        .collect();
    Ok(records)
}

/// Read filer inputs from JSON: a single profile object, or `{ "filers": [...] }`
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<Vec<InputRecord>> {
    let document: serde_json::Value = serde_json::from_reader(reader)?;

    let values = match document {
        serde_json::Value::Object(mut map) if map.contains_key("filers") => {
            match map.remove("filers") {
                Some(serde_json::Value::Array(filers)) => filers,
                _ => anyhow::bail!("\"filers\" must be an array of filer profiles"),
            }
        }
        serde_json::Value::Array(_) => {
            anyhow::bail!("expected a filer profile object or {{\"filers\": [...]}}, found an array")
        }
        single => vec![single],
    };

    Ok(values
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(|e| ProfileError::Malformed(e.to_string())))
        .collect())
}

#[cfg(test)]
pub(crate) fn test_profile() -> FilerProfile {
    FilerProfile {
        married: false,
        american_citizen: true,
        employed: false,
        blind: false,
        spouse_blind: false,
        age: 30,
        spouse_age: 0,
        children: 0,
        children_in_college: 0,
        income: Decimal::ZERO,
        capital_gains: Decimal::ZERO,
        charitable_givings: Decimal::ZERO,
        mortgage_value: Decimal::ZERO,
        medical_expenses: Decimal::ZERO,
        state: states::lookup("Texas").unwrap(),
    }
}
