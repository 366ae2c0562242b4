//! # Money Module
//!
//! Provides the `Money` type used by the discount calculator.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    1299.99 × 0.7 = 909.9929999999999  ❌ not a price                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    129999 × (10000 − 3000) / 10000 → 90999 → 909.99                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Extract prices arrive as decimals (`Sale Rate Value`, `MRP`). They are
//! converted to minor units once, at the edge, with [`Money::from_decimal`].
//!
//! ## Usage
//! ```rust
//! use stocklens_core::money::Money;
//!
//! let price = Money::from_decimal(100.0).unwrap();
//! let discounted = price.apply_percentage_discount(3000); // 30% off
//! assert_eq!(discounted.as_decimal(), 70.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (paise, cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values (return amounts)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No currency symbol**: extracts carry a single, implicit currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use stocklens_core::money::Money;
    ///
    /// let price = Money::from_minor(129999);
    /// assert_eq!(price.to_string(), "1299.99");
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Converts a decimal amount, rounding half away from zero to the
    /// nearest minor unit.
    ///
    /// Returns `None` for NaN, infinities, and amounts beyond `i64` range.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        let minor = (amount * 100.0).round();
        if !minor.is_finite() || minor.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(minor as i64))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal (for JSON and display only).
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (3000 = 30%)
    ///
    /// ## Implementation
    /// The result is `amount × (10000 − bps) / 10000`, rounded half away
    /// from zero to the nearest minor unit, so a negative price discounts
    /// to the mirror image of the positive one.
    ///
    /// ## Example
    /// ```rust
    /// use stocklens_core::money::Money;
    ///
    /// let price = Money::from_minor(10000); // 100.00
    /// let discounted = price.apply_percentage_discount(3000);
    /// assert_eq!(discounted.minor(), 7000); // 70.00
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        // i128 keeps large prices from overflowing during the multiply
        let scaled = self.0 as i128 * (10_000 - discount_bps as i128);
        let rounded = (scaled + scaled.signum() * 5_000) / 10_000;
        Money(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two decimal places, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_minor_units() {
        assert_eq!(Money::from_decimal(100.0).unwrap().minor(), 10000);
        assert_eq!(Money::from_decimal(1299.99).unwrap().minor(), 129999);
        assert_eq!(Money::from_decimal(0.005).unwrap().minor(), 1);
        assert_eq!(Money::from_decimal(-5.5).unwrap().minor(), -550);
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(1e300).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(129999).to_string(), "1299.99");
        assert_eq!(Money::from_minor(500).to_string(), "5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::from_minor(0).to_string(), "0.00");
    }

    #[test]
    fn test_flat_thirty_percent_is_exact() {
        let price = Money::from_decimal(100.0).unwrap();
        let discounted = price.apply_percentage_discount(3000);
        assert_eq!(discounted.minor(), 7000);
        assert_eq!(discounted.as_decimal(), 70.0);
    }

    #[test]
    fn test_discount_rounds_to_nearest_minor_unit() {
        // 1299.99 × 30% = 389.997 → 390.00 discount
        let price = Money::from_minor(129999);
        assert_eq!(price.apply_percentage_discount(3000).minor(), 90999);
    }

    #[test]
    fn test_negative_discount_mirrors_positive() {
        assert_eq!(Money::from_minor(-10000).apply_percentage_discount(3000).minor(), -7000);
        assert_eq!(Money::from_minor(-100).apply_percentage_discount(3000).minor(), -70);
        assert_eq!(Money::from_minor(-129999).apply_percentage_discount(3000).minor(), -90999);
    }
}
