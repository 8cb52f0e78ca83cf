//! Projected days until funds run out.

use core::fmt::{self, Display, Formatter};

use alloy_primitives::U256;
use stowage_units::Decimal;

/// Days of runway at some daily cost.
///
/// A zero daily cost never exhausts the funds, so the runway is
/// [`Runway::Unbounded`] rather than a division error. Every finite runway
/// orders below `Unbounded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Runway {
    /// A finite number of days.
    Days(Decimal),
    /// No cost accrues.
    Unbounded,
}

impl Runway {
    /// Runway of `funds` spent at `daily_cost` per day.
    pub fn at_daily_cost(funds: U256, daily_cost: U256) -> Self {
        Decimal::from(funds)
            .checked_div(Decimal::from(daily_cost))
            .map_or(Self::Unbounded, Self::Days)
    }

    /// Whether the runway lasts at least `days`.
    pub fn covers(&self, days: u64) -> bool {
        match self {
            Self::Days(left) => *left >= Decimal::from(days),
            Self::Unbounded => true,
        }
    }

    /// Finite day count, if any.
    pub fn days(&self) -> Option<Decimal> {
        match self {
            Self::Days(left) => Some(*left),
            Self::Unbounded => None,
        }
    }

    /// Display value; [`Runway::Unbounded`] becomes `f64::INFINITY`.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Days(left) => left.to_f64(),
            Self::Unbounded => f64::INFINITY,
        }
    }
}

impl Default for Runway {
    fn default() -> Self {
        Self::Days(Decimal::ZERO)
    }
}

impl Display for Runway {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(left) => write!(f, "{} days", left.to_fixed(1)),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}
