//! # Money Module
//!
//! Integer-cent money for catalog prices and purchase totals.
//!
//! Prices only ever get compared (upsell detection) and summed (revenue
//! stats), so the type stays small: construction from cents, ordering,
//! addition, and a debug-friendly `Display`.
//!
//! ## Usage
//! ```rust
//! use vitrina_core::money::Money;
//!
//! let basic = Money::from_cents(50_000);
//! let premium = Money::from_cents(150_000);
//! assert!(premium > basic);
//!
//! let revenue: Money = [basic, premium].into_iter().sum();
//! assert_eq!(revenue.cents(), 200_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// As a newtype it serializes as a bare integer, so catalog JSON can say
/// `"price": 1500`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use vitrina_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (refund totals).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// For logs and reason strings; the frontend does localized formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(150_000)), "$1500.00");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_ordering_drives_upsell_comparison() {
        assert!(Money::from_cents(1500) > Money::from_cents(1000));
        assert!(Money::from_cents(-1) < Money::zero());
    }

    #[test]
    fn test_sum_saturates() {
        let totals = [Money::from_cents(1000), Money::from_cents(250)];
        let sum: Money = totals.iter().sum();
        assert_eq!(sum.cents(), 1250);

        let huge = [Money::from_cents(i64::MAX), Money::from_cents(1)];
        let capped: Money = huge.into_iter().sum();
        assert_eq!(capped.cents(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_cents(1500)).unwrap();
        assert_eq!(json, "1500");
        let back: Money = serde_json::from_str("1500").unwrap();
        assert_eq!(back, Money::from_cents(1500));
        assert!(!back.is_negative());
    }
}
