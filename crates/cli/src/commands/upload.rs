//! `check-upload` command.

use eyre::Result;
use humansize::{BINARY, format_size};
use std::path::Path;
use stowage_economics::{UploadCheck, check_upload};
use stowage_units::format_signed_balance;
use tracing::info;

use crate::{cli::CheckUploadArgs, config::AppConfig};

pub(crate) fn run(config_path: &Path, args: CheckUploadArgs) -> Result<()> {
    let config = args.plan.apply(AppConfig::load_or_default(config_path).plan);
    let (payments, account) = super::load_snapshot(&args.source)?;

    let check = check_upload(&payments, account, &config, args.file_size)?;
    info!(%account, file_size = args.file_size, ?check, "upload checked");

    println!("{}", render(&check, args.file_size, payments.balances.stablecoin_decimals));
    Ok(())
}

pub(crate) fn render(check: &UploadCheck, file_size: u64, decimals: u8) -> String {
    let size = format_size(file_size, BINARY);
    match check {
        UploadCheck::Proceed => format!("Upload of {size} can proceed."),
        UploadCheck::TopUp { amount } => format!(
            "Upload of {size} needs a top-up of {} and operator approval first.",
            format_signed_balance(*amount, decimals)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::I256;

    #[test]
    fn test_render_proceed() {
        assert_eq!(render(&UploadCheck::Proceed, 1024, 18), "Upload of 1 KiB can proceed.");
    }

    #[test]
    fn test_render_top_up() {
        let amount = I256::try_from(1_500_000u64).unwrap();
        assert_eq!(
            render(&UploadCheck::TopUp { amount }, 2048, 6),
            "Upload of 2 KiB needs a top-up of 1.5 and operator approval first."
        );
    }
}
