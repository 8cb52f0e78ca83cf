//! Protocol constants for storage billing.
//!
//! Storage is billed per epoch. An epoch is 30 seconds, so a day is 2880
//! epochs and a 30-day month is 86,400 epochs.

use alloy_primitives::U256;

/// Duration of one epoch in seconds.
pub const EPOCH_DURATION_SECS: u64 = 30;

/// Epochs in 24 hours.
pub const EPOCHS_PER_DAY: u64 = 24 * 60 * 60 / EPOCH_DURATION_SECS;

/// Days in a billing month.
pub const DAYS_PER_MONTH: u64 = 30;

/// Epochs in a 30-day month.
pub const EPOCHS_PER_MONTH: u64 = EPOCHS_PER_DAY * DAYS_PER_MONTH;

/// An allowance at or above this value is an unlimited approval.
///
/// Only unlimited rate and lockup approvals count as sufficient; a finite
/// allowance, however large, can be exhausted as the committed rate grows.
pub const MAX_ALLOWANCE_SENTINEL: U256 = U256::MAX;

/// Fee charged when creating a CDN-enabled dataset (one whole stablecoin).
pub const CDN_DATA_SET_CREATION_FEE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Decimals of the payment stablecoin.
pub const STABLECOIN_DECIMALS: u8 = 18;

/// Decimals of the chain's native gas token.
pub const NATIVE_DECIMALS: u8 = 18;

pub(crate) const EPOCHS_PER_DAY_U256: U256 = U256::from_limbs([EPOCHS_PER_DAY, 0, 0, 0]);

pub(crate) const EPOCHS_PER_MONTH_U256: U256 = U256::from_limbs([EPOCHS_PER_MONTH, 0, 0, 0]);
