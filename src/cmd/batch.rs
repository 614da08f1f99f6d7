//! Batch command - one result row per filer, for spreadsheets and scripts

use super::read_inputs;
use crate::core::{assess, InputRecord};
use clap::Args;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Filer profiles file (JSON or CSV). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Treat the input as CSV regardless of file extension
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of CSV
    #[arg(long)]
    json: bool,
}

/// Result row; amounts are blank and `error` is set when the profile is invalid
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchRow {
    pub filer: usize,
    pub state: String,
    pub married: String,
    pub standard_deduction: String,
    pub itemized_deductions: String,
    pub deduction_method: String,
    pub agi: String,
    pub personal_exemption: String,
    pub taxable_income: String,
    pub income_tax: String,
    pub capital_gains_tax: String,
    pub credits: String,
    pub total_tax_burden: String,
    pub error: String,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_inputs(&self.file, self.csv)?;
        let rows = build_rows(records);

        let rejected = rows.iter().filter(|r| !r.error.is_empty()).count();
        if rejected > 0 {
            log::warn!("{} of {} filer profile(s) were invalid", rejected, rows.len());
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        } else {
            write_csv(&rows, io::stdout())
        }
    }
}

pub fn build_rows(records: Vec<InputRecord>) -> Vec<BatchRow> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let filer = i + 1;
            let profile = match record.and_then(|input| input.validate()) {
                Ok(profile) => profile,
                Err(e) => {
                    return BatchRow {
                        filer,
                        error: e.to_string(),
                        ..Default::default()
                    }
                }
            };

            let a = assess(&profile);
            BatchRow {
                filer,
                state: profile.state.name.to_string(),
                married: profile.married.to_string(),
                standard_deduction: format!("{:.2}", a.deductions.standard),
                itemized_deductions: format!("{:.2}", a.deductions.itemized.total()),
                deduction_method: a.deductions.method.to_string(),
                agi: format!("{:.2}", a.agi),
                personal_exemption: format!("{:.2}", a.personal_exemption),
                taxable_income: format!("{:.2}", a.taxable_income),
                income_tax: format!("{:.2}", a.income_tax),
                capital_gains_tax: format!("{:.2}", a.capital_gains_tax),
                credits: format!("{:.2}", a.credits.total()),
                total_tax_burden: format!("{:.2}", a.total_tax_burden),
                error: String::new(),
            }
        })
        .collect()
}

fn write_csv<W: io::Write>(rows: &[BatchRow], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
