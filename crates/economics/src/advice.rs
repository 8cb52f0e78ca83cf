//! What the account holder should do next.
//!
//! Turns a [`StorageCalculationResult`] and wallet balances into the single
//! action that gates the deposit and withdraw buttons, and into the top-up
//! decision taken before an upload.

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

use crate::StorageCalculationResult;

/// Balances held by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalances {
    /// Native gas token in the wallet.
    pub native: U256,
    /// Payment stablecoin in the wallet.
    pub stablecoin: U256,
    /// Stablecoin deposited in the payments contract and available for storage.
    pub payments_available: U256,
    /// Decimals of the payment stablecoin.
    #[serde(default = "default_stablecoin_decimals")]
    pub stablecoin_decimals: u8,
}

impl Default for WalletBalances {
    fn default() -> Self {
        Self {
            native: U256::ZERO,
            stablecoin: U256::ZERO,
            payments_available: U256::ZERO,
            stablecoin_decimals: crate::STABLECOIN_DECIMALS,
        }
    }
}

fn default_stablecoin_decimals() -> u8 {
    crate::STABLECOIN_DECIMALS
}

/// Next step for an account's storage payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAdvice {
    /// Plan is funded and approved. `withdrawable` may be taken out while
    /// keeping the persistence target.
    Ready { withdrawable: U256 },
    /// The wallet lacks gas or stablecoin, so no payment can be made.
    FundWallet { needs_native: bool, needs_stablecoin: bool },
    /// A deposit and/or allowance increase is required.
    ActionNeeded {
        /// Amount to deposit, when positive.
        deposit: Option<U256>,
        /// Raise the lockup allowance (only reported when no deposit is due,
        /// since the deposit flow re-approves the operator).
        increase_lockup: bool,
        increase_rate: bool,
    },
}

impl PaymentAdvice {
    /// Decide the next step.
    pub fn evaluate(metrics: &StorageCalculationResult, balances: &WalletBalances) -> Self {
        if metrics.is_sufficient {
            return Self::Ready { withdrawable: metrics.available_to_free_up };
        }

        if balances.native.is_zero() || balances.stablecoin.is_zero() {
            return Self::FundWallet {
                needs_native: balances.native.is_zero(),
                needs_stablecoin: balances.stablecoin.is_zero(),
            };
        }

        let deposit = (metrics.deposit_needed > I256::ZERO)
            .then(|| metrics.deposit_needed.unsigned_abs());

        Self::ActionNeeded {
            deposit,
            increase_lockup: !metrics.is_lockup_sufficient && deposit.is_none(),
            increase_rate: !metrics.is_rate_sufficient,
        }
    }

    /// Whether the withdraw action should be offered.
    pub fn can_withdraw(&self) -> bool {
        matches!(self, Self::Ready { withdrawable } if !withdrawable.is_zero())
    }
}

/// Affordability of a specific upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadCheck {
    /// Upload can go ahead.
    Proceed,
    /// Payments must be topped up (and the operator approved) first.
    TopUp { amount: I256 },
}

impl UploadCheck {
    /// Decide from metrics computed with the upload's file size.
    pub fn evaluate(metrics: &StorageCalculationResult) -> Self {
        if metrics.is_sufficient {
            Self::Proceed
        } else {
            Self::TopUp { amount: metrics.deposit_needed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn funded_wallet() -> WalletBalances {
        WalletBalances {
            native: U256::from(1u8),
            stablecoin: U256::from(1u8),
            ..Default::default()
        }
    }

    fn sufficient() -> StorageCalculationResult {
        StorageCalculationResult {
            is_sufficient: true,
            is_rate_sufficient: true,
            is_lockup_sufficient: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_ready_with_withdrawable() {
        let metrics = StorageCalculationResult {
            available_to_free_up: U256::from(7u8),
            ..sufficient()
        };
        let advice = PaymentAdvice::evaluate(&metrics, &WalletBalances::default());
        assert_eq!(advice, PaymentAdvice::Ready { withdrawable: U256::from(7u8) });
        assert!(advice.can_withdraw());

        let advice = PaymentAdvice::evaluate(&sufficient(), &funded_wallet());
        assert!(!advice.can_withdraw());
    }

    #[test]
    fn test_empty_wallet_needs_funding() {
        let balances = WalletBalances { native: U256::from(1u8), ..Default::default() };
        assert_matches!(
            PaymentAdvice::evaluate(&StorageCalculationResult::default(), &balances),
            PaymentAdvice::FundWallet { needs_native: false, needs_stablecoin: true }
        );
    }

    #[test]
    fn test_deposit_needed() {
        let metrics = StorageCalculationResult {
            deposit_needed: I256::try_from(500u64).unwrap(),
            is_rate_sufficient: true,
            ..Default::default()
        };
        assert_matches!(
            PaymentAdvice::evaluate(&metrics, &funded_wallet()),
            PaymentAdvice::ActionNeeded { deposit: Some(amount), increase_lockup: false, increase_rate: false }
                if amount == U256::from(500u64)
        );
    }

    #[test]
    fn test_allowances_only() {
        let metrics = StorageCalculationResult::default();
        assert_matches!(
            PaymentAdvice::evaluate(&metrics, &funded_wallet()),
            PaymentAdvice::ActionNeeded { deposit: None, increase_lockup: true, increase_rate: true }
        );
    }

    #[test]
    fn test_negative_deposit_is_not_a_deposit() {
        let metrics = StorageCalculationResult {
            deposit_needed: -I256::try_from(500u64).unwrap(),
            ..Default::default()
        };
        assert_matches!(
            PaymentAdvice::evaluate(&metrics, &funded_wallet()),
            PaymentAdvice::ActionNeeded { deposit: None, .. }
        );
    }

    #[test]
    fn test_upload_check() {
        assert_eq!(UploadCheck::evaluate(&sufficient()), UploadCheck::Proceed);

        let metrics = StorageCalculationResult {
            deposit_needed: I256::try_from(42u64).unwrap(),
            ..Default::default()
        };
        assert_eq!(
            UploadCheck::evaluate(&metrics),
            UploadCheck::TopUp { amount: I256::try_from(42u64).unwrap() }
        );
    }
}
