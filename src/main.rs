mod cmd;
mod core;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ustax", version, about = "US federal tax burden calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate and display the tax breakdown for each filer
    Calc(cmd::calc::CalcCommand),
    /// Calculate many filers at once, one CSV (or JSON) row each
    Batch(cmd::batch::BatchCommand),
    /// Check filer profiles for invalid or missing fields
    Validate(cmd::validate::ValidateCommand),
    /// List state income tax rates used for the state tax deduction
    States(cmd::states::StatesCommand),
    /// Print the expected input format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calc(calc) => calc.exec(),
        Command::Batch(batch) => batch.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::States(states) => states.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
