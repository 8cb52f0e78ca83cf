//! Byte-size constants and conversions.
//!
//! All conversions go through [`Decimal`] so that chained divisions of large
//! byte counts stay exact to 34 significant digits. A "GB" entered by a user
//! is treated as a GiB (1024³ bytes) throughout the storage cost model.

use alloy_primitives::U256;

use crate::Decimal;

/// Bytes in a kibibyte.
pub const KIB: u64 = 1 << 10;

/// Bytes in a mebibyte.
pub const MIB: u64 = 1 << 20;

/// Bytes in a gibibyte.
pub const GIB: u64 = 1 << 30;

/// Bytes in a tebibyte.
pub const TIB: u64 = 1 << 40;

/// [`KIB`] as a [`U256`].
pub const KIB_U256: U256 = U256::from_limbs([KIB, 0, 0, 0]);

/// [`MIB`] as a [`U256`].
pub const MIB_U256: U256 = U256::from_limbs([MIB, 0, 0, 0]);

/// [`GIB`] as a [`U256`].
pub const GIB_U256: U256 = U256::from_limbs([GIB, 0, 0, 0]);

/// [`TIB`] as a [`U256`].
pub const TIB_U256: U256 = U256::from_limbs([TIB, 0, 0, 0]);

/// Converts bytes to KiB.
pub fn bytes_to_kib(bytes: impl Into<Decimal>) -> Decimal {
    per_unit(bytes.into(), KIB)
}

/// Converts bytes to MiB.
pub fn bytes_to_mib(bytes: impl Into<Decimal>) -> Decimal {
    per_unit(bytes.into(), MIB)
}

/// Converts bytes to GiB.
pub fn bytes_to_gib(bytes: impl Into<Decimal>) -> Decimal {
    per_unit(bytes.into(), GIB)
}

/// Converts bytes to TiB.
pub fn bytes_to_tib(bytes: impl Into<Decimal>) -> Decimal {
    per_unit(bytes.into(), TIB)
}

/// Converts TiB to bytes.
pub fn tib_to_bytes(tib: impl Into<Decimal>) -> Decimal {
    tib.into() * Decimal::from(TIB)
}

/// Human-readable size, labelled with the GiB-based "GB" convention.
///
/// Sizes strictly above a unit boundary are shown in that unit with four
/// decimals; anything up to and including 1 KiB is shown in bytes.
pub fn size_message(bytes: U256) -> String {
    if bytes > GIB_U256 {
        format!("{} GB", bytes_to_gib(bytes).to_fixed(4))
    } else if bytes > MIB_U256 {
        format!("{} MB", bytes_to_mib(bytes).to_fixed(4))
    } else if bytes > KIB_U256 {
        format!("{} KB", bytes_to_kib(bytes).to_fixed(4))
    } else {
        format!("{bytes} B")
    }
}

fn per_unit(value: Decimal, unit: u64) -> Decimal {
    // `unit` is one of the non-zero constants above.
    value.checked_div(Decimal::from(unit)).unwrap_or(Decimal::ZERO)
}
