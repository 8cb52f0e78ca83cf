//! Balance dashboard report.

use stowage_units::format_balance;
use tracing::info;

use crate::{NATIVE_DECIMALS, PaymentAdvice, StorageCalculationResult, WalletBalances};

/// Wallet balances, plan metrics and their display figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceReport {
    pub balances: WalletBalances,
    pub metrics: StorageCalculationResult,
    pub advice: PaymentAdvice,
    pub native_formatted: f64,
    pub stablecoin_formatted: f64,
    pub payments_formatted: f64,
    pub available_to_free_up_formatted: f64,
    pub monthly_rate_formatted: f64,
    pub max_monthly_rate_formatted: f64,
}

impl BalanceReport {
    /// Assemble a report; stablecoin figures use the wallet's reported decimals.
    pub fn new(balances: WalletBalances, metrics: StorageCalculationResult) -> Self {
        let decimals = balances.stablecoin_decimals;
        Self {
            advice: PaymentAdvice::evaluate(&metrics, &balances),
            native_formatted: format_balance(balances.native, NATIVE_DECIMALS),
            stablecoin_formatted: format_balance(balances.stablecoin, decimals),
            payments_formatted: format_balance(balances.payments_available, decimals),
            available_to_free_up_formatted: format_balance(metrics.available_to_free_up, decimals),
            monthly_rate_formatted: format_balance(metrics.current_monthly_rate, decimals),
            max_monthly_rate_formatted: format_balance(metrics.max_monthly_rate, decimals),
            balances,
            metrics,
        }
    }

    /// Log the report, one `info!` per line.
    pub fn log(&self) {
        info!("Storage balances:");
        info!("  Native: {}", self.native_formatted);
        info!("  Stablecoin: {}", self.stablecoin_formatted);
        info!("  Payments available: {}", self.payments_formatted);
        info!(
            "  Monthly rate: {} (plan: {})",
            self.monthly_rate_formatted, self.max_monthly_rate_formatted
        );
        info!(
            "  Days left: {} (at current rate: {})",
            self.metrics.days_left, self.metrics.days_left_at_current_rate
        );
        info!("  Sufficient: {}", self.metrics.is_sufficient);
    }
}

impl Default for BalanceReport {
    fn default() -> Self {
        Self::new(WalletBalances::default(), StorageCalculationResult::default())
    }
}
