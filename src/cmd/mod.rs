pub mod batch;
pub mod calc;
pub mod schema;
pub mod states;
pub mod validate;

use crate::core::{self, InputRecord};
use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read filer profiles from a JSON or CSV file (or stdin with "-")
pub fn read_inputs(path: &Path, force_csv: bool) -> anyhow::Result<Vec<InputRecord>> {
    let is_csv = force_csv
        || path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let records = if path.as_os_str() == "-" {
        read_from_stdin(is_csv)?
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        read_records(BufReader::new(file), is_csv)
            .with_context(|| format!("reading {}", path.display()))?
    };

    log::info!("Read {} filer record(s)", records.len());
    Ok(records)
}

fn read_from_stdin(is_csv: bool) -> anyhow::Result<Vec<InputRecord>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.iter().all(u8::is_ascii_whitespace) {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    read_records(io::Cursor::new(buffer), is_csv).context("reading stdin")
}

fn read_records<R: Read>(reader: R, is_csv: bool) -> anyhow::Result<Vec<InputRecord>> {
    if is_csv {
        core::read_csv(reader)
    } else {
        core::read_json(reader)
    }
}

pub fn format_usd(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}
