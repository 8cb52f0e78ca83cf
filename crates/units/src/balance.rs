//! Token amount formatting.
//!
//! On-chain balances are integers in the token's smallest unit. These helpers
//! turn them into whole-token figures for display.

use alloy_primitives::{I256, U256};

use crate::Decimal;

/// Decimal places kept by [`format_balance`].
pub const BALANCE_DISPLAY_DECIMALS: u32 = 5;

/// The amount as a number of whole tokens, e.g. `1.5` for `1.5e18` wei at 18
/// decimals.
pub fn format_units(amount: U256, decimals: u8) -> Decimal {
    Decimal::from_parts(amount, -i32::from(decimals))
}

/// Whole-token amount rounded half-up to [`BALANCE_DISPLAY_DECIMALS`] places,
/// as a display number.
pub fn format_balance(amount: U256, decimals: u8) -> f64 {
    format_units(amount, decimals)
        .round_dp(BALANCE_DISPLAY_DECIMALS)
        .to_f64()
}

/// Signed variant of [`format_balance`].
pub fn format_signed_balance(amount: I256, decimals: u8) -> f64 {
    let magnitude = format_balance(amount.unsigned_abs(), decimals);
    if amount.is_negative() { -magnitude } else { magnitude }
}
