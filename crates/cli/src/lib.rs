//! Command-line front end for stowage.
//!
//! Wires the economics crate to a TOML plan file, a chain snapshot and
//! `tracing` output on stderr. Reports go to stdout.

mod args;
mod cli;
mod commands;
mod config;
mod logging;

pub use args::{LogArgs, PlanArgs};
pub use cli::{
    CheckUploadArgs, Cli, Commands, ConfigArgs, ConfigCommand, ConvertArgs, SnapshotArgs,
    StatusArgs,
};
pub use commands::execute;
pub use config::{AppConfig, ConfigFileError, DEFAULT_CONFIG_FILE};
pub use logging::init_logging;

use clap::Parser;

/// Parse arguments, set up logging and run the selected command.
pub fn run() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.logs)?;
    execute(cli)
}
