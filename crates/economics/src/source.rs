//! Readers for the chain state the calculator consumes.
//!
//! Fetching, caching and retrying chain reads belong to the implementor; the
//! helpers here only combine one snapshot of each into a result.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    BalanceReport, OperatorApprovals, PriceQuote, StorageMetricsParams, UploadCheck, UserConfig,
    WalletBalances, calculate_storage_metrics,
};

/// Errors from a [`PaymentsReader`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The reader has no state for this account.
    #[error("account {0} not found")]
    AccountNotFound(Address),

    /// The underlying source could not be read.
    #[error("payments source unavailable: {0}")]
    Unavailable(String),
}

/// Read access to storage prices, operator approvals and balances.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait PaymentsReader: Send + Sync {
    /// Current storage service price.
    fn service_price(&self) -> Result<PriceQuote, SourceError>;

    /// Approvals `account` has granted the storage operator.
    fn operator_approvals(&self, account: Address) -> Result<OperatorApprovals, SourceError>;

    /// Wallet and payments-contract balances of `account`.
    fn wallet_balances(&self, account: Address) -> Result<WalletBalances, SourceError>;

    /// Funds `account` has available for storage payments.
    fn available_funds(&self, account: Address) -> Result<U256, SourceError> {
        Ok(self.wallet_balances(account)?.payments_available)
    }
}

/// A fixed snapshot of one account's payment state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticPayments {
    pub account: Address,
    pub prices: PriceQuote,
    pub approvals: OperatorApprovals,
    pub balances: WalletBalances,
}

impl StaticPayments {
    fn ensure_account(&self, account: Address) -> Result<(), SourceError> {
        if account == self.account {
            Ok(())
        } else {
            Err(SourceError::AccountNotFound(account))
        }
    }
}

impl PaymentsReader for StaticPayments {
    fn service_price(&self) -> Result<PriceQuote, SourceError> {
        Ok(self.prices)
    }

    fn operator_approvals(&self, account: Address) -> Result<OperatorApprovals, SourceError> {
        self.ensure_account(account)?;
        Ok(self.approvals)
    }

    fn wallet_balances(&self, account: Address) -> Result<WalletBalances, SourceError> {
        self.ensure_account(account)?;
        Ok(self.balances)
    }
}

/// Read everything for `account` and build its balance report.
pub fn fetch_balance_report(
    reader: impl PaymentsReader,
    account: Address,
    config: &UserConfig,
) -> Result<BalanceReport, SourceError> {
    let balances = reader.wallet_balances(account)?;
    let params = StorageMetricsParams {
        prices: reader.service_price()?,
        operator_approvals: reader.operator_approvals(account)?,
        available_funds: balances.payments_available,
        config: *config,
        file_size: None,
    };

    debug!(%account, "building balance report");
    Ok(BalanceReport::new(balances, calculate_storage_metrics(&params)))
}

/// Decide whether `account` can afford to upload `file_size` bytes now.
pub fn check_upload(
    reader: impl PaymentsReader,
    account: Address,
    config: &UserConfig,
    file_size: u64,
) -> Result<UploadCheck, SourceError> {
    let params = StorageMetricsParams {
        prices: reader.service_price()?,
        operator_approvals: reader.operator_approvals(account)?,
        available_funds: reader.available_funds(account)?,
        config: *config,
        file_size: Some(file_size),
    };

    let check = UploadCheck::evaluate(&calculate_storage_metrics(&params));
    debug!(%account, file_size, ?check, "checked upload affordability");
    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_ALLOWANCE_SENTINEL, PaymentAdvice};
    use alloy_primitives::I256;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    const SNAPSHOT: &str = r#"
account = "0x1111111111111111111111111111111111111111"

[prices]
price_per_tib_per_month_no_cdn = "0x2625a0"
epochs_per_month = "0x15180"

[approvals]
rate_used = "0x0"
rate_allowance = "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
lockup_allowance = "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"

[balances]
native = "0xde0b6b3a7640000"
stablecoin = "0xde0b6b3a7640000"
payments_available = "0xde0b6b3a7640000"
"#;

    fn snapshot() -> StaticPayments {
        toml::from_str(SNAPSHOT).unwrap()
    }

    #[test]
    fn test_snapshot_parses() {
        let payments = snapshot();
        assert_eq!(payments.account, Address::repeat_byte(0x11));
        assert_eq!(payments.prices.price_per_tib_per_month_no_cdn, U256::from(2_500_000u64));
        assert_eq!(payments.prices.epochs_per_month, U256::from(86_400u64));
        assert_eq!(payments.approvals.rate_allowance, MAX_ALLOWANCE_SENTINEL);
        assert_eq!(payments.balances.stablecoin_decimals, 18);
    }

    #[test]
    fn test_fetch_balance_report() {
        let payments = snapshot();
        let report =
            fetch_balance_report(&payments, payments.account, &UserConfig::default()).unwrap();

        assert!(report.metrics.is_sufficient);
        assert_eq!(report.payments_formatted, 1.0);
        assert_matches!(report.advice, PaymentAdvice::Ready { withdrawable } if withdrawable > U256::ZERO);
    }

    #[test]
    fn test_unknown_account() {
        let payments = Arc::new(snapshot());
        let err = fetch_balance_report(payments, Address::ZERO, &UserConfig::default()).unwrap_err();
        assert_matches!(err, SourceError::AccountNotFound(account) if account == Address::ZERO);
    }

    #[test]
    fn test_check_upload() {
        let mut payments = snapshot();
        let account = payments.account;
        assert_eq!(
            check_upload(&payments, account, &UserConfig::default(), 1 << 30).unwrap(),
            UploadCheck::Proceed
        );

        payments.balances.payments_available = U256::ZERO;
        assert_matches!(
            check_upload(&payments, account, &UserConfig::default(), 1 << 40).unwrap(),
            UploadCheck::TopUp { amount } if amount > I256::ZERO
        );
    }
}
