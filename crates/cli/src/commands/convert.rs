//! `convert` command.

use alloy_primitives::U256;
use eyre::Result;
use stowage_units::{bytes_to_gib, bytes_to_kib, bytes_to_mib, bytes_to_tib, size_message};

use crate::cli::ConvertArgs;

pub(crate) fn run(args: ConvertArgs) -> Result<()> {
    print!("{}", render(args.bytes));
    Ok(())
}

pub(crate) fn render(bytes: U256) -> String {
    format!(
        "bytes: {bytes}\nKiB: {}\nMiB: {}\nGiB: {}\nTiB: {}\n{}\n",
        bytes_to_kib(bytes),
        bytes_to_mib(bytes),
        bytes_to_gib(bytes),
        bytes_to_tib(bytes),
        size_message(bytes),
    )
}
