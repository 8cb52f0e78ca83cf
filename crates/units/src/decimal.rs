//! Non-negative decimal arithmetic with 34 significant digits.
//!
//! A [`Decimal`] is `coefficient × 10^exponent` where the coefficient is a
//! [`U256`] holding at most [`PRECISION`] significant digits. Every result is
//! rounded half-up back to that precision, so chained divisions of wei-scale
//! integers stay within one unit in the 34th digit instead of drifting the way
//! `f64` does past 15-17 digits.
//!
//! Values are kept canonical (no trailing zeros in the coefficient), so two
//! equal numbers always share one representation.

use core::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    ops::Mul,
    str::FromStr,
};

use alloy_primitives::U256;

/// Number of significant digits retained by every [`Decimal`].
pub const PRECISION: u32 = 34;

/// Longest digit string accumulated while parsing before the tail is dropped.
const MAX_PARSE_DIGITS: usize = 70;

const TEN: U256 = U256::from_limbs([10, 0, 0, 0]);

/// Errors produced when parsing a [`Decimal`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    /// The input was empty (after trimming whitespace).
    #[error("empty decimal string")]
    Empty,

    /// The input contained a character that is not a digit or a single point.
    #[error("invalid character {0:?} in decimal string")]
    InvalidDigit(char),

    /// The input carried a minus sign.
    #[error("negative decimals are not representable")]
    Negative,
}

/// Arbitrary-precision, non-negative decimal number.
#[derive(Clone, Copy, Debug)]
pub struct Decimal {
    coefficient: U256,
    exponent: i32,
}

impl Decimal {
    /// Zero.
    pub const ZERO: Self = Self { coefficient: U256::ZERO, exponent: 0 };

    /// One.
    pub const ONE: Self = Self { coefficient: U256::from_limbs([1, 0, 0, 0]), exponent: 0 };

    /// Build `coefficient × 10^exponent`, rounding to [`PRECISION`] digits.
    pub fn from_parts(coefficient: U256, exponent: i32) -> Self {
        Self::normalize(coefficient, exponent)
    }

    /// Returns `true` if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Divide, returning `None` when `rhs` is zero.
    ///
    /// The dividend is widened so the raw quotient carries at least one digit
    /// beyond [`PRECISION`]; the final rounding therefore sees the true first
    /// discarded digit.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(Self::ZERO);
        }

        let lhs_digits = digit_count(self.coefficient);
        let rhs_digits = digit_count(rhs.coefficient);
        let shift = (PRECISION + 1 + rhs_digits).saturating_sub(lhs_digits);

        let widened = self.coefficient * pow10(shift);
        let quotient = widened / rhs.coefficient;
        let exponent = self
            .exponent
            .saturating_sub(shift as i32)
            .saturating_sub(rhs.exponent);

        Some(Self::normalize(quotient, exponent))
    }

    /// Convert to `f64` for display. Precision beyond `f64` is lost here and
    /// nowhere earlier.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        format!("{}e{}", self.coefficient, self.exponent)
            .parse()
            .unwrap_or(f64::INFINITY)
    }

    /// Round half-up to at most `dp` decimal places.
    pub fn round_dp(&self, dp: u32) -> Self {
        let shift = i64::from(self.exponent) + i64::from(dp);
        if shift >= 0 {
            return *self;
        }

        let drop = shift.unsigned_abs();
        if drop > u64::from(PRECISION + 1) {
            return Self::ZERO;
        }
        Self::normalize(
            div_round_half_up(self.coefficient, pow10(drop as u32)),
            -(dp as i32),
        )
    }

    /// Round half-up to `dp` decimal places and render with exactly `dp`
    /// fraction digits.
    pub fn to_fixed(&self, dp: u32) -> String {
        let shift = i64::from(self.exponent) + i64::from(dp);
        let scaled = if shift >= 0 {
            let mut digits = self.coefficient.to_string();
            if !self.is_zero() {
                digits.push_str(&"0".repeat(shift as usize));
            }
            digits
        } else {
            let drop = shift.unsigned_abs();
            if drop > u64::from(PRECISION + 1) {
                "0".to_string()
            } else {
                div_round_half_up(self.coefficient, pow10(drop as u32)).to_string()
            }
        };

        if dp == 0 {
            return scaled;
        }

        let dp = dp as usize;
        let padded = if scaled.len() <= dp {
            format!("{}{}", "0".repeat(dp + 1 - scaled.len()), scaled)
        } else {
            scaled
        };
        let (int, frac) = padded.split_at(padded.len() - dp);
        format!("{int}.{frac}")
    }

    fn normalize(mut coefficient: U256, mut exponent: i32) -> Self {
        if coefficient.is_zero() {
            return Self::ZERO;
        }

        let digits = digit_count(coefficient);
        if digits > PRECISION {
            let drop = digits - PRECISION;
            coefficient = div_round_half_up(coefficient, pow10(drop));
            exponent = exponent.saturating_add(drop as i32);

            // 99..9 rounded up to 10^PRECISION.
            if digit_count(coefficient) > PRECISION {
                coefficient /= TEN;
                exponent = exponent.saturating_add(1);
            }
        }

        while (coefficient % TEN).is_zero() {
            coefficient /= TEN;
            exponent = exponent.saturating_add(1);
        }

        Self { coefficient, exponent }
    }

    /// Position of the most significant digit, i.e. `digits + exponent`.
    fn magnitude(&self) -> i64 {
        i64::from(digit_count(self.coefficient)) + i64::from(self.exponent)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<U256> for Decimal {
    fn from(value: U256) -> Self {
        Self::normalize(value, 0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::normalize(U256::from(value), 0)
    }
}

impl From<u128> for Decimal {
    fn from(value: u128) -> Self {
        Self::normalize(U256::from(value), 0)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::normalize(U256::from(value), 0)
    }
}

impl Mul for Decimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        // Both coefficients are below 10^34, so the product fits in 256 bits.
        Self::normalize(
            self.coefficient * rhs.coefficient,
            self.exponent.saturating_add(rhs.exponent),
        )
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        let by_magnitude = self.magnitude().cmp(&other.magnitude());
        if by_magnitude != Ordering::Equal {
            return by_magnitude;
        }

        // Same leading digit position: the exponent gap is below PRECISION.
        if self.exponent >= other.exponent {
            let gap = (self.exponent - other.exponent) as u32;
            (self.coefficient * pow10(gap)).cmp(&other.coefficient)
        } else {
            let gap = (other.exponent - self.exponent) as u32;
            self.coefficient.cmp(&(other.coefficient * pow10(gap)))
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        let digits = self.coefficient.to_string();
        if self.exponent >= 0 {
            return write!(f, "{digits}{}", "0".repeat(self.exponent as usize));
        }

        let point = self.exponent.unsigned_abs() as usize;
        if digits.len() > point {
            let (int, frac) = digits.split_at(digits.len() - point);
            write!(f, "{int}.{frac}")
        } else {
            write!(f, "0.{}{digits}", "0".repeat(point - digits.len()))
        }
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DecimalError::Empty);
        }
        if s.starts_with('-') {
            return Err(DecimalError::Negative);
        }

        let (int, frac) = s.split_once('.').unwrap_or((s, ""));
        if int.is_empty() && frac.is_empty() {
            return Err(DecimalError::Empty);
        }
        if let Some(bad) = int.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
            return Err(DecimalError::InvalidDigit(bad));
        }

        let all: String = int.chars().chain(frac.chars()).collect();
        let significant = all.trim_start_matches('0');
        let mut exponent = -(frac.len() as i64);

        // Digits past MAX_PARSE_DIGITS cannot change a half-up rounding to 34
        // digits, so they only move the exponent.
        let kept = if significant.len() > MAX_PARSE_DIGITS {
            exponent += (significant.len() - MAX_PARSE_DIGITS) as i64;
            significant.get(..MAX_PARSE_DIGITS).unwrap_or(significant)
        } else {
            significant
        };

        let coefficient = kept.bytes().fold(U256::ZERO, |acc, b| {
            acc * TEN + U256::from(b - b'0')
        });
        let exponent = exponent.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

        Ok(Self::normalize(coefficient, exponent))
    }
}

/// `10^n` as a [`U256`]. Callers keep `n` at or below 77.
fn pow10(n: u32) -> U256 {
    (0..n).fold(U256::from(1u8), |acc, _| acc * TEN)
}

fn digit_count(mut value: U256) -> u32 {
    let mut count = 0;
    while !value.is_zero() {
        value /= TEN;
        count += 1;
    }
    count
}

fn div_round_half_up(numerator: U256, divisor: U256) -> U256 {
    let quotient = numerator / divisor;
    let remainder = numerator % divisor;
    if remainder >= divisor - remainder {
        quotient + U256::from(1u8)
    } else {
        quotient
    }
}
