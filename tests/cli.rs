//! E2E tests for the ustax commands

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn ustax(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ustax"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Test the married Texas scenario end to end
#[test]
fn calc_texas_retirees() {
    let output = ustax(&["calc", "tests/data/texas_retirees.json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("TAX BURDEN - Filer 1 (married, Texas)"));
    assert!(stdout.contains("Itemized deductions (claimed)"));
    assert!(stdout.contains("$152760.00"));
    assert!(stdout.contains("$25607.50"));
}

/// Test calc JSON output exposes the intermediate values
#[test]
fn calc_json_output() {
    let output = ustax(&["calc", "tests/data/texas_retirees.json", "--json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let filer = &json[0];
    assert_eq!(filer["filer"], 1);
    assert_eq!(filer["state"], "Texas");
    assert_eq!(filer["deductions"]["method"], "Itemized");
    assert_eq!(amount(&filer["agi"]), 152760.0);
    assert_eq!(amount(&filer["personal_exemption"]), 16600.0);
    assert_eq!(amount(&filer["total_tax_burden"]), 25607.5);
}

/// Amounts are serialized as decimal strings
fn amount(value: &serde_json::Value) -> f64 {
    value.as_str().unwrap().parse().unwrap()
}

/// Test reading a profile from stdin
#[test]
fn calc_from_stdin() {
    let profile = std::fs::read("tests/data/texas_retirees.json").unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_ustax"))
        .args(["calc", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child.stdin.take().unwrap().write_all(&profile).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("$25607.50"));
}

/// Test that invalid profiles are reported by field and fail the command
#[test]
fn calc_rejects_invalid_profiles() {
    let output = ustax(&["calc", "tests/data/invalid.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Filer 1: state: unknown jurisdiction: 'Atlantis'"));
    assert!(stderr.contains("Filer 2: charitable_givings must not be negative"));
}

/// Test batch CSV output for several households
#[test]
fn batch_csv_households() {
    let output = ustax(&["batch", "tests/data/households.csv"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("filer,state,married,"));
    assert!(lines[1].ends_with(",-487.00,"));
    assert!(lines[2].ends_with(",25607.50,"));
    assert!(lines[3].ends_with(",8872.00,-7832.00,"));
    assert!(lines[4].ends_with(",23713.81,"));
}

/// Test batch keeps going past invalid rows
#[test]
fn batch_reports_invalid_rows() {
    let output = ustax(&["batch", "tests/data/invalid.json", "--json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["error"], "state: unknown jurisdiction: 'Atlantis'");
    assert_eq!(rows[1]["error"], "charitable_givings must not be negative (got -250)");
}

/// Test validate exits non-zero and lists every issue
#[test]
fn validate_invalid_profiles() {
    let output = ustax(&["validate", "tests/data/invalid.json"]);
    let stdout = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("2 issue(s) found"));
    assert!(stdout.contains("Filer 1 [state]"));
    assert!(stdout.contains("Filer 2 [charitable_givings]"));
}

/// Test validate passes clean input
#[test]
fn validate_clean_profiles() {
    let output = ustax(&["validate", "tests/data/households.csv"]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("No issues found"));
}

/// Test the state table listing with a deduction column
#[test]
fn states_with_income() {
    let output = ustax(&["states", "--income", "200000"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("Texas"));
    assert!(stdout.contains("11.12%"));
    assert!(stdout.contains("$22240.00"));
    assert!(stdout.contains("Washington DC"));
}

/// Test the CSV header matches the batch input format
#[test]
fn schema_csv_header() {
    let output = ustax(&["schema", "csv-header"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let expected = std::fs::read_to_string("tests/data/households.csv").unwrap();
    assert_eq!(stdout.lines().next(), expected.lines().next());
}

/// Test the JSON schema names the input fields
#[test]
fn schema_json() {
    let output = ustax(&["schema"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"FilerInput\""));
    assert!(stdout.contains("\"children_in_college\""));
}
