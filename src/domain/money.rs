//! Monetary amounts in minor currency units and percentage rates.

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Amount in minor currency units (cents). Exact, never floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Cents(value)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const BPS_PER_UNIT: u32 = 10_000;

/// Proportional rate in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(u32);

impl Rate {
    /// Flat 40% applied by the default strategy.
    pub const DEFAULT: Rate = Rate(4_000);

    pub fn from_bps(bps: u32) -> DomainResult<Self> {
        if bps > BPS_PER_UNIT {
            return Err(DomainError::InvalidRate(bps));
        }
        Ok(Rate(bps))
    }

    pub fn bps(self) -> u32 {
        self.0
    }

    /// Apply the rate to `amount`, rounding to the nearest minor unit with
    /// ties away from zero.
    ///
    /// The product is formed in `i128` so no intermediate can overflow; since
    /// the rate never exceeds 100% the result always fits back into `i64`.
    pub fn apply(self, amount: Cents) -> Cents {
        let product = i128::from(amount.0) * i128::from(self.0);
        let denom = i128::from(BPS_PER_UNIT) * 2;
        let half = i128::from(BPS_PER_UNIT);
        let magnitude = (product.abs() * 2 + half) / denom;
        let rounded = if product < 0 { -magnitude } else { magnitude };
        // |rounded| <= |amount| because rate <= 100%
        Cents(rounded as i64)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::DEFAULT
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}
