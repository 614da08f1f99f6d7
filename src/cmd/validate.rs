//! Validate command - surface input problems without computing any tax

use super::read_inputs;
use crate::core::InputRecord;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Filer profiles file (JSON or CSV). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Treat the input as CSV regardless of file extension
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ValidationIssue {
    filer: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    message: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    filer_count: usize,
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_inputs(&self.file, self.csv)?;
        let filer_count = records.len();
        let issues = collect_issues(&records);

        if self.json {
            let output = ValidationOutput {
                filer_count,
                issue_count: issues.len(),
                issues: issues.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_text(&issues, filer_count);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn collect_issues(records: &[InputRecord]) -> Vec<ValidationIssue> {
    records
        .iter()
        .enumerate()
        .flat_map(|(i, record)| {
            let errors = match record {
                Ok(input) => input.issues(),
                Err(e) => vec![e.clone()],
            };
            errors.into_iter().map(move |e| ValidationIssue {
                filer: i + 1,
                field: e.field(),
                message: e.to_string(),
            })
        })
        .collect()
}

fn print_text(issues: &[ValidationIssue], filer_count: usize) {
    println!();
    println!("VALIDATION RESULTS ({} filer profile(s))", filer_count);
    println!();

    if issues.is_empty() {
        println!("\u{2713} No issues found.");
        return;
    }

    println!("\u{26A0} {} issue(s) found:", issues.len());
    println!();
    for (i, issue) in issues.iter().enumerate() {
        match issue.field {
            Some(field) => println!("  {}. Filer {} [{}]", i + 1, issue.filer, field),
            None => println!("  {}. Filer {}", i + 1, issue.filer),
        }
        println!("     {}", issue.message);
        println!();
    }
}
