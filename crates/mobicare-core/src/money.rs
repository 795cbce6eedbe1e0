//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    Every price is stored in paise (1/100 rupee) as an i64.              │
//! │    ₹1,59,900 is 15_990_000 paise - exact, always.                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mobicare_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(2_490_000); // ₹24,900.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_rupees(100);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(24900.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type:
/// `Product.price_paise` → `CartLineItem` → `Cart::total` → display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use mobicare_core::money::Money;
    ///
    /// let price = Money::from_paise(999_500); // ₹9,995.00
    /// assert_eq!(price.paise(), 999_500);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// The product catalog carries whole-rupee prices, so this is the
    /// common entry point for seeded data.
    ///
    /// ## Example
    /// ```rust
    /// use mobicare_core::money::Money;
    ///
    /// let price = Money::from_rupees(159_900);
    /// assert_eq!(price.paise(), 15_990_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    ///
    /// ## Example
    /// ```rust
    /// use mobicare_core::money::Money;
    ///
    /// let price = Money::from_paise(1_099);
    /// assert_eq!(price.rupees(), 10);
    ///
    /// let negative = Money::from_paise(-550);
    /// assert_eq!(negative.rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99, absolute value).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Arithmetic Operators
// =============================================================================

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

/// Multiplies money by a quantity (line totals: unit price × quantity).
///
/// Saturates instead of overflowing: quantities have no upper bound, so
/// an absurd line must pin at `i64::MAX` paise rather than panic in a
/// debug build or wrap in release.
impl Mul<i64> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, rhs: i64) -> Money {
        Money(self.0.saturating_mul(rhs))
    }
}

/// Saturating, like `Mul`: a cart grand total can only pin, not wrap.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| Money(acc.0.saturating_add(m.0)))
    }
}

// =============================================================================
// Display
// =============================================================================

/// Formats as `₹<rupees>.<paise>`, e.g. `₹159900.00`.
///
/// Grouped (lakh/crore) display formatting belongs to the view layer;
/// this is the plain diagnostic form used in logs and receipts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise_and_rupees() {
        assert_eq!(Money::from_paise(1_099).paise(), 1_099);
        assert_eq!(Money::from_rupees(10).paise(), 1_000);
    }

    #[test]
    fn test_rupee_and_paise_parts() {
        let m = Money::from_paise(1_099);
        assert_eq!(m.rupees(), 10);
        assert_eq!(m.paise_part(), 99);

        let neg = Money::from_paise(-550);
        assert_eq!(neg.rupees(), -5);
        assert_eq!(neg.paise_part(), 50);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1_000);
        let b = Money::from_paise(250);

        assert_eq!((a + b).paise(), 1_250);
        assert_eq!((a - b).paise(), 750);
        assert_eq!((b * 3).paise(), 750);

        let mut c = a;
        c += b;
        assert_eq!(c.paise(), 1_250);
        c -= b;
        assert_eq!(c.paise(), 1_000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .into_iter()
            .map(Money::from_paise)
            .sum();
        assert_eq!(total.paise(), 600);
    }

    #[test]
    fn test_mul_and_sum_saturate_instead_of_overflowing() {
        let line = Money::from_paise(i64::MAX / 2) * 3;
        assert_eq!(line.paise(), i64::MAX);

        let total: Money = [i64::MAX, i64::MAX].into_iter().map(Money::from_paise).sum();
        assert_eq!(total.paise(), i64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(1_099).to_string(), "₹10.99");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = Money::from_rupees(24_900);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
