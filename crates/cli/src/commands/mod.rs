//! Command implementations.

mod config;
mod convert;
mod status;
mod upload;

use alloy_primitives::Address;
use eyre::{Result, WrapErr};
use std::{fs, path::Path};
use stowage_economics::StaticPayments;

use crate::cli::{Cli, Commands, SnapshotArgs};

/// Execute the parsed command.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status(args) => status::run(&cli.config, args),
        Commands::CheckUpload(args) => upload::run(&cli.config, args),
        Commands::Convert(args) => convert::run(args),
        Commands::Config(args) => config::run(&cli.config, args),
    }
}

/// Load a chain snapshot and resolve the account to evaluate.
fn load_snapshot(args: &SnapshotArgs) -> Result<(StaticPayments, Address)> {
    let payments = read_snapshot(&args.snapshot)?;
    let account = args.account.unwrap_or(payments.account);
    Ok((payments, account))
}

fn read_snapshot(path: &Path) -> Result<StaticPayments> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read snapshot {}", path.display()))?;
    toml::from_str(&content).wrap_err_with(|| format!("invalid snapshot {}", path.display()))
}
