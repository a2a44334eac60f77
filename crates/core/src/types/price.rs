//! Whole-unit prices and money formatting.
//!
//! The shop's currency has no minor unit, so amounts are plain non-negative
//! integers and every calculation stays in integer arithmetic.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// Prefix rendered in front of every amount.
pub const CURRENCY_PREFIX: &str = "$";

/// Separator placed between groups of three digits.
pub const GROUP_SEPARATOR: char = '.';

/// A price in whole currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-unit amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The amount in whole currency units.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` units, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Sum of two prices, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_money(self.0))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

/// Render an amount with the currency prefix and thousands grouping.
///
/// ```
/// use tiendita_core::format_money;
///
/// assert_eq!(format_money(0), "$0");
/// assert_eq!(format_money(12_000), "$12.000");
/// assert_eq!(format_money(1_000_000), "$1.000.000");
/// ```
#[must_use]
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(CURRENCY_PREFIX.len() + digits.len() + digits.len() / 3);
    out.push_str(CURRENCY_PREFIX);

    // Groups are counted from the least-significant digit.
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
