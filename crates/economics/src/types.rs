//! Chain snapshots consumed by the calculator.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Storage service price quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Price of storing 1 TiB for one month without CDN, in the smallest
    /// stablecoin unit.
    pub price_per_tib_per_month_no_cdn: U256,

    /// Epochs per 30-day month as reported by the service.
    pub epochs_per_month: U256,
}

/// Spend approvals granted by an account to the storage operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperatorApprovals {
    /// Per-epoch rate currently committed.
    pub rate_used: U256,

    /// Maximum per-epoch rate the account has authorised.
    pub rate_allowance: U256,

    /// Maximum total the account has authorised to be locked.
    pub lockup_allowance: U256,
}

impl OperatorApprovals {
    /// Approvals at the unlimited sentinel for both rate and lockup.
    pub fn unlimited(rate_used: U256) -> Self {
        Self {
            rate_used,
            rate_allowance: crate::MAX_ALLOWANCE_SENTINEL,
            lockup_allowance: crate::MAX_ALLOWANCE_SENTINEL,
        }
    }
}
