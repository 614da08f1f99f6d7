//! States command - the state income tax table used for the state tax deduction

use super::{format_rate, format_usd};
use crate::core::{jurisdictions, Jurisdiction};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct StatesCommand {
    /// Show the state tax deduction each jurisdiction gives for this income
    #[arg(short, long)]
    income: Option<Decimal>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct StateRow {
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Deduction")]
    deduction: String,
}

#[derive(Debug, Serialize)]
struct StateView {
    #[serde(flatten)]
    jurisdiction: Jurisdiction,
    #[serde(skip_serializing_if = "Option::is_none")]
    deduction: Option<Decimal>,
}

impl StatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if let Some(income) = self.income {
            if income < Decimal::ZERO {
                anyhow::bail!("income must not be negative (got {})", income);
            }
        }

        let views: Vec<_> = jurisdictions()
            .map(|j| StateView {
                jurisdiction: j,
                deduction: self.income.map(|income| j.deduction(income)),
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&views)?);
        } else {
            self.print_table(&views);
        }
        Ok(())
    }

    fn print_table(&self, views: &[StateView]) {
        let rows: Vec<_> = views
            .iter()
            .map(|v| StateRow {
                state: v.jurisdiction.name.to_string(),
                rate: format_rate(v.jurisdiction.rate),
                deduction: v.deduction.map_or("-".to_string(), format_usd),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}
