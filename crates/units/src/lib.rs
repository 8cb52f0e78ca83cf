//! Units for storage economics.
//!
//! Byte sizes, token amounts, and the 34-digit [`Decimal`] they are computed
//! in. Plain `f64` appears only at the display boundary
//! ([`Decimal::to_f64`], [`format_balance`]).
//!
//! # Components
//!
//! - [`Decimal`] - Non-negative decimal with 34 significant digits, round-half-up
//! - [`bytes_to_kib`] / [`bytes_to_mib`] / [`bytes_to_gib`] / [`tib_to_bytes`] - Unit conversion
//! - [`size_message`] - Human-readable size label
//! - [`format_units`] / [`format_balance`] - Token amount formatting

mod balance;
mod decimal;
mod size;

pub use balance::{BALANCE_DISPLAY_DECIMALS, format_balance, format_signed_balance, format_units};
pub use decimal::{Decimal, DecimalError, PRECISION};
pub use size::{
    GIB, GIB_U256, KIB, KIB_U256, MIB, MIB_U256, TIB, TIB_U256, bytes_to_gib, bytes_to_kib,
    bytes_to_mib, bytes_to_tib, size_message, tib_to_bytes,
};
