pub mod assessment;
pub mod credits;
pub mod deductions;
pub mod exemption;
pub mod profile;
pub mod schedule;
pub mod states;

// Flat public surface for domain types and functions.
pub use assessment::{assess, Assessment};
#[allow(unused_imports)]
pub use assessment::{
    agi, credits, itemized_deductions, personal_exemption, standard_deduction, tax_burden,
};
pub use credits::Credits;
pub use deductions::{DeductionMethod, Deductions, Itemized};
pub use profile::{read_csv, read_json, FilerInput, FilerProfile, InputField, InputRecord, ProfileError};
pub use schedule::{Bracket, Schedule};
pub use states::{jurisdictions, lookup, state_tax_deduction, Jurisdiction, UnknownJurisdiction};
