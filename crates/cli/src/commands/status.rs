//! `status` command.

use eyre::Result;
use humansize::{BINARY, format_size};
use std::{
    fmt::{self, Display, Formatter},
    path::Path,
};
use stowage_economics::{
    BalanceReport, PaymentAdvice, STABLECOIN_DECIMALS, UserConfig, dataset_creation_fee,
    fetch_balance_report,
};
use stowage_units::{GIB, format_balance};
use tracing::info;

use crate::{cli::StatusArgs, config::AppConfig};

pub(crate) fn run(config_path: &Path, args: StatusArgs) -> Result<()> {
    let config = args.plan.apply(AppConfig::load_or_default(config_path).plan);
    let (payments, account) = super::load_snapshot(&args.source)?;

    info!(%account, "evaluating storage plan");
    let report = fetch_balance_report(&payments, account, &config)?;
    report.log();

    print!("{}", StatusView { report: &report, config: &config });
    Ok(())
}

/// Human-readable status of a report under a plan.
pub(crate) struct StatusView<'a> {
    pub(crate) report: &'a BalanceReport,
    pub(crate) config: &'a UserConfig,
}

impl Display for StatusView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { report, config } = *self;
        let decimals = report.balances.stablecoin_decimals;
        let metrics = &report.metrics;

        writeln!(
            f,
            "Plan: {} GB ({}) for {} days, notify below {} days, CDN {}",
            config.storage_capacity,
            format_size(config.storage_capacity.saturating_mul(GIB), BINARY),
            config.persistence_period,
            config.min_days_threshold,
            if config.with_cdn { "on" } else { "off" },
        )?;
        if config.with_cdn {
            // The fee is quoted in the protocol's 18-decimal stablecoin units.
            writeln!(
                f,
                "CDN dataset creation fee: {}",
                format_balance(dataset_creation_fee(true), STABLECOIN_DECIMALS)
            )?;
        }
        writeln!(
            f,
            "Wallet: native {}, stablecoin {}, payments {}",
            report.native_formatted, report.stablecoin_formatted, report.payments_formatted
        )?;
        writeln!(
            f,
            "Days left: {} (at current rate: {})",
            metrics.days_left, metrics.days_left_at_current_rate
        )?;
        writeln!(
            f,
            "Monthly rate: {} (plan: {})",
            report.monthly_rate_formatted, report.max_monthly_rate_formatted
        )?;

        match report.advice {
            PaymentAdvice::Ready { .. } => {
                writeln!(f, "All set.")?;
                if report.advice.can_withdraw() {
                    writeln!(
                        f,
                        "{} available to withdraw while keeping storage active.",
                        report.available_to_free_up_formatted
                    )?;
                }
            }
            PaymentAdvice::FundWallet { needs_native, needs_stablecoin } => {
                if needs_native {
                    writeln!(f, "Add native tokens for network fees.")?;
                }
                if needs_stablecoin {
                    writeln!(f, "Add stablecoin for storage payments.")?;
                }
            }
            PaymentAdvice::ActionNeeded { deposit, increase_lockup, increase_rate } => {
                writeln!(f, "Action needed:")?;
                if let Some(amount) = deposit {
                    writeln!(
                        f,
                        "  - deposit {} to reach the plan target",
                        format_balance(amount, decimals)
                    )?;
                }
                if increase_lockup {
                    writeln!(
                        f,
                        "  - increase lockup allowance to meet the {} day threshold (currently {})",
                        config.min_days_threshold, metrics.days_left
                    )?;
                }
                if increase_rate {
                    writeln!(
                        f,
                        "  - increase rate allowance for {} GB capacity",
                        config.storage_capacity
                    )?;
                }
            }
        }

        Ok(())
    }
}
