//! CLI argument assembly and top-level parser.

use alloy_primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::{
    args::{LogArgs, PlanArgs},
    config::DEFAULT_CONFIG_FILE,
};

/// Stowage - storage payment planning for prepaid decentralized storage
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE, env = "STOWAGE_CONFIG")]
    pub config: PathBuf,

    /// Logging configuration.
    #[command(flatten)]
    pub logs: LogArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Stowage commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show balances, runway and the next payment action.
    Status(StatusArgs),

    /// Check whether an upload of a given size is affordable now.
    CheckUpload(CheckUploadArgs),

    /// Convert a byte count to KiB/MiB/GiB/TiB.
    Convert(ConvertArgs),

    /// Inspect or change the saved storage plan.
    Config(ConfigArgs),
}

/// Where to read chain state from.
#[derive(Debug, Args, Clone)]
pub struct SnapshotArgs {
    /// TOML snapshot of prices, approvals and balances.
    #[arg(long, value_name = "PATH")]
    pub snapshot: PathBuf,

    /// Account to evaluate. Defaults to the snapshot's account.
    #[arg(long, value_name = "ADDRESS")]
    pub account: Option<Address>,
}

/// Arguments for the `status` command.
#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Arguments for the `check-upload` command.
#[derive(Debug, Args)]
pub struct CheckUploadArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Size of the file to upload, in bytes.
    #[arg(long, value_name = "BYTES")]
    pub file_size: u64,

    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Arguments for the `convert` command.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Byte count (decimal or 0x-prefixed hex).
    pub bytes: U256,
}

/// Arguments for the `config` command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Plan management.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective plan.
    Show(PlanArgs),

    /// Save plan changes to the configuration file.
    Set(PlanArgs),

    /// Remove the configuration file, restoring defaults.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from([
            "stowage",
            "status",
            "--snapshot",
            "state.toml",
            "--plan.capacity",
            "500",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.logs.verbosity, 1);
        assert_matches!(cli.command, Commands::Status(args) if args.plan.capacity == Some(500));
    }

    #[test]
    fn test_parse_convert_hex() {
        let cli = Cli::try_parse_from(["stowage", "convert", "0x400"]).unwrap();
        assert_matches!(cli.command, Commands::Convert(args) if args.bytes == U256::from(1024u64));
    }
}
