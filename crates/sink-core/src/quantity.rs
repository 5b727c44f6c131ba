//! Precision-safe resource quantities.
//!
//! Uses `rust_decimal` for exact decimal arithmetic so that capacity
//! bookkeeping never drifts through floating-point rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Sub};
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Amount of a resource (kg for materials, arbitrary units otherwise).
///
/// `Quantity::MAX` doubles as the "unbounded" sentinel for throughput and
/// storage limits that were not configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub Decimal);

impl Quantity {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);
    /// Largest representable quantity, used for "no limit".
    pub const MAX: Self = Self(Decimal::MAX);
    /// Near-zero floor (1e-6). Amounts at or below it are treated as nothing.
    pub const EPS: Self = Self(Decimal::from_parts(1, 0, 0, false, 6));

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a quantity, rejecting negative values.
    pub fn try_new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(CoreError::InvalidQuantity(format!(
                "quantity must not be negative, got {value}"
            )));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// True when the amount is strictly above [`Quantity::EPS`].
    #[inline]
    pub fn exceeds_eps(&self) -> bool {
        *self > Self::EPS
    }

    /// True for the "no limit" sentinel.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        *self == Self::MAX
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Divide evenly into `parts` shares.
    ///
    /// Returns `None` when `parts` is zero.
    #[inline]
    pub fn split(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        Some(Self(self.0 / Decimal::from(parts)))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Quantity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_new(s.parse()?)
    }
}

impl From<Decimal> for Quantity {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Div<Decimal> for Quantity {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self(self.0 / rhs)
    }
}

/// Totals saturate at [`Quantity::MAX`].
impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, q| Self(acc.0.saturating_add(q.0)))
    }
}

impl<'a> Sum<&'a Quantity> for Quantity {
    fn sum<I: Iterator<Item = &'a Quantity>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_eps_is_one_millionth() {
        assert_eq!(Quantity::EPS.inner(), dec!(0.000001));
        assert!(!Quantity::EPS.exceeds_eps());
        assert!(Quantity::new(dec!(0.0000011)).exceeds_eps());
    }

    #[test]
    fn test_try_new_rejects_negative() {
        assert!(Quantity::try_new(dec!(-1)).is_err());
        assert!(Quantity::try_new(dec!(0)).is_ok());
        assert!(Quantity::try_new(dec!(12.5)).is_ok());
    }

    #[test]
    fn test_split() {
        let q = Quantity::new(dec!(50));
        assert_eq!(q.split(2), Some(Quantity::new(dec!(25))));
        assert_eq!(q.split(0), None);
    }

    #[test]
    fn test_unbounded_split_stays_finite() {
        let share = Quantity::MAX.split(3).unwrap();
        assert!(share < Quantity::MAX);
        assert!(share.is_positive());
    }

    #[test]
    fn test_checked_add_overflow() {
        assert!(Quantity::MAX.checked_add(Quantity::ONE).is_none());
        assert_eq!(
            Quantity::ONE.checked_add(Quantity::ONE),
            Some(Quantity::new(dec!(2)))
        );
    }

    #[test]
    fn test_parse_and_display() {
        let q: Quantity = "40.50".parse().unwrap();
        assert_eq!(q.to_string(), "40.5");
        assert!("-3".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_sum() {
        let total: Quantity = [dec!(1), dec!(2.5), dec!(3)]
            .into_iter()
            .map(Quantity::new)
            .sum();
        assert_eq!(total, Quantity::new(dec!(6.5)));
    }

    #[test]
    fn test_sum_saturates_at_max() {
        let half = Quantity::MAX.split(2).unwrap();
        let total: Quantity = [half, half, half].iter().sum();
        assert_eq!(total, Quantity::MAX);
    }
}
