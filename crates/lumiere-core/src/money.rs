//! # Money
//!
//! Catalog prices and cart amounts as whole cents.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  price (cents) × quantity ──► line total ──Σ──► subtotal ──► total   │
//! │                                                                      │
//! │  Every step is i64 arithmetic. A subtotal of many lines is exact,    │
//! │  so the amount charged equals the amount shown in the cart drawer.   │
//! │                                                                      │
//! │  Eternal Diamond Ring $4999 = 499_900 cents                          │
//! │    × 2 = 999_800 cents                                               │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lumiere_core::money::Money;
//!
//! let ring = Money::from_major(4999);   // $4999.00
//! let chain = Money::from_cents(89_900); // $899.00
//!
//! let subtotal = ring * 2 + chain;
//! assert_eq!(subtotal.cents(), 1_089_700);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// An amount in US cents.
///
/// Signed so that `original_price - price` on a discounted product stays
/// representable. Serializes as a bare integer.
///
/// ```text
/// Product.price ──► LineEntry.price ──► CartLine.line_total()
///                                            │
/// CartState.subtotal() ◄─────────────────────┘
///        │
///        └──► PaymentRequest.amount ──► OrderConfirmation.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps a raw cent amount.
    ///
    /// ```rust
    /// use lumiere_core::money::Money;
    ///
    /// let chain = Money::from_cents(89_950);
    /// assert_eq!(chain.to_string(), "$899.50");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units (dollars).
    ///
    /// Catalog prices are whole dollars, so this is how the builtin
    /// catalog spells them.
    ///
    /// ## Example
    /// ```rust
    /// use lumiere_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(4999).cents(), 499_900);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Raw cent amount.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents past the whole dollar, as 0 to 99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use lumiere_core::money::Money;
    ///
    /// let unit_price = Money::from_major(1299); // Pearl Cascade Earrings
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_major(3897));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns how many whole percent `self` is below `original`.
    ///
    /// Rounds to the nearest percent, half away from zero. Returns `None`
    /// when `original` is not positive.
    ///
    /// ## Example
    /// ```rust
    /// use lumiere_core::money::Money;
    ///
    /// let price = Money::from_major(4999);
    /// let original = Money::from_major(5999);
    /// assert_eq!(price.percent_below(original), Some(17));
    /// ```
    pub fn percent_below(&self, original: Money) -> Option<i64> {
        if original.0 <= 0 {
            return None;
        }
        // (1 - price / original) * 100, in integer math
        let saved = (original.0 as i128 - self.0 as i128) * 100;
        let denom = original.0 as i128;
        let rounded = if saved >= 0 {
            (saved * 2 + denom) / (denom * 2)
        } else {
            -((-saved * 2 + denom) / (denom * 2))
        };
        Some(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$4999.00` style, used by logs and the CLI. The web UI formats amounts
/// on its own.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "${}.{:02}", self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Money(self.0.saturating_sub(rhs.0))
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing line totals into a subtotal.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollars_and_cents_parts() {
        let chain = Money::from_cents(89_950);
        assert_eq!(chain.dollars(), 899);
        assert_eq!(chain.cents_part(), 50);

        let refund = Money::from_cents(-1_205);
        assert_eq!(refund.dollars(), -12);
        assert_eq!(refund.cents_part(), 5);

        assert_eq!(Money::from_major(899), Money::from_cents(89_900));
    }

    #[test]
    fn test_display_matches_storefront_prices() {
        assert_eq!(Money::from_major(4999).to_string(), "$4999.00");
        assert_eq!(Money::from_cents(1_205).to_string(), "$12.05");
        assert_eq!(Money::from_cents(-1_205).to_string(), "-$12.05");
        assert_eq!(Money::default().to_string(), "$0.00");
    }

    #[test]
    fn test_operators() {
        let ring = Money::from_major(4999);
        let studs = Money::from_major(1299);

        assert_eq!(ring + studs, Money::from_major(6298));
        assert_eq!(ring - studs, Money::from_major(3700));
        assert_eq!(studs * 3, Money::from_major(3897));

        let mut running = Money::zero();
        running += ring;
        running += studs;
        assert_eq!(running, Money::from_major(6298));
    }

    #[test]
    fn test_sum_of_line_totals() {
        let lines = [Money::from_cents(4999) * 2, Money::from_cents(899)];
        let subtotal: Money = lines.into_iter().sum();
        assert_eq!(subtotal.cents(), 10_897);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_percent_below() {
        // Catalog discounts: 4999/5999, 3299/3999, 7999/9499
        assert_eq!(
            Money::from_major(4999).percent_below(Money::from_major(5999)),
            Some(17)
        );
        assert_eq!(
            Money::from_major(3299).percent_below(Money::from_major(3999)),
            Some(18)
        );
        assert_eq!(
            Money::from_major(7999).percent_below(Money::from_major(9499)),
            Some(16)
        );
        assert_eq!(Money::from_major(10).percent_below(Money::zero()), None);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let vault = Money::from_cents(i64::MAX / 2);
        assert_eq!(vault.multiply_quantity(u32::MAX), Money::from_cents(i64::MAX));
        assert_eq!(vault + vault + vault, Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));

        let mut running = Money::from_cents(i64::MAX);
        running += Money::from_cents(1);
        assert_eq!(running, Money::from_cents(i64::MAX));

        let total: Money = [vault, vault, vault].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::from_cents(1).is_zero());
    }
}
