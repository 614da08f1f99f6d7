//! Calc command - full tax breakdown for each filer profile

use super::{format_rate, format_usd, read_inputs};
use crate::core::{assess, Assessment, DeductionMethod, FilerProfile};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CalcCommand {
    /// Filer profile file (JSON or CSV). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Treat the input as CSV regardless of file extension
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct CalcOutput<'a> {
    filer: usize,
    state: &'a str,
    married: bool,
    #[serde(flatten)]
    assessment: Assessment,
}

#[derive(Debug, Clone, Tabled)]
struct LineItem {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_inputs(&self.file, self.csv)?;
        let total = records.len();

        let mut profiles = Vec::new();
        let mut rejected = 0;
        for (i, record) in records.into_iter().enumerate() {
            match record.and_then(|input| input.validate()) {
                Ok(profile) => profiles.push((i + 1, profile)),
                Err(e) => {
                    rejected += 1;
                    eprintln!("Filer {}: {}", i + 1, e);
                }
            }
        }

        let assessed: Vec<_> = profiles
            .iter()
            .map(|(n, profile)| (*n, profile, assess(profile)))
            .collect();

        if self.json {
            let output: Vec<_> = assessed
                .into_iter()
                .map(|(filer, profile, assessment)| CalcOutput {
                    filer,
                    state: profile.state.name,
                    married: profile.married,
                    assessment,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for (n, profile, assessment) in &assessed {
                print_assessment(*n, profile, assessment);
            }
        }

        if rejected > 0 {
            anyhow::bail!("{} of {} filer profile(s) were invalid", rejected, total);
        }
        Ok(())
    }
}

fn print_assessment(n: usize, profile: &FilerProfile, a: &Assessment) {
    let status = if profile.married { "married" } else { "single" };
    println!();
    println!("TAX BURDEN - Filer {} ({}, {})", n, status, profile.state.name);

    let d = &a.deductions;
    let claimed = |method: DeductionMethod| {
        if d.method == method {
            " (claimed)"
        } else {
            ""
        }
    };

    let mut items = vec![
        line(
            &format!("Standard deduction{}", claimed(DeductionMethod::Standard)),
            format_usd(d.standard),
        ),
        line("  Charitable giving", format_usd(d.itemized.charitable)),
        line("  Mortgage interest", format_usd(d.itemized.mortgage_interest)),
        line(
            &format!("  State tax @ {}", format_rate(profile.state.rate)),
            format_usd(d.itemized.state_tax),
        ),
        line("  Medical expenses", format_usd(d.itemized.medical)),
        line(
            &format!("Itemized deductions{}", claimed(DeductionMethod::Itemized)),
            format_usd(d.itemized.total()),
        ),
        line("Adjusted gross income", format_usd(a.agi)),
        line("Personal exemption", format_usd(a.personal_exemption)),
        line("Taxable income", format_usd(a.taxable_income)),
        line(
            &format!("Income tax @ {} marginal", format_rate(a.marginal_rate())),
            format_usd(a.income_tax),
        ),
        line("Capital gains tax", format_usd(a.capital_gains_tax)),
        line("Earned income credit", format_usd(a.credits.earned_income)),
        line("Child tax credit", format_usd(a.credits.child_tax)),
        line(
            "American Opportunity credit",
            format_usd(a.credits.american_opportunity),
        ),
    ];
    let total_label = if a.is_refund() {
        "TOTAL TAX BURDEN (refund)"
    } else {
        "TOTAL TAX BURDEN"
    };
    items.push(line(total_label, format_usd(a.total_tax_burden)));

    let table = Table::new(items)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

fn line(item: &str, amount: String) -> LineItem {
    LineItem {
        item: item.to_string(),
        amount,
    }
}
