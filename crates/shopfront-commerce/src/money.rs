//! Money type for representing monetary values.
//!
//! Amounts are exact decimals so that sums of line items stay exact until
//! the final rounding step. Rounding to cents happens only where a value is
//! reported: discount amounts, order totals and aggregate statistics.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places reported amounts are rounded to.
pub const CENT_PLACES: u32 = 2;

/// A monetary value in the shop's single currency.
///
/// Serialized as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Create a Money value from a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from an integer count of cents.
    ///
    /// ```
    /// use shopfront_commerce::money::Money;
    /// let price = Money::from_cents(4999);
    /// assert_eq!(price.display(), "$49.99");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CENT_PLACES))
    }

    /// Create a zero amount.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if this is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiply by a quantity. `None` if the result is out of range.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(factor)).map(Money)
    }

    /// Add another amount. `None` if the result is out of range.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtract another amount. `None` if the result is out of range.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Apply a fractional rate (0.10 for ten percent). The result is not rounded.
    pub fn try_apply_rate(&self, rate: Decimal) -> Option<Money> {
        self.0.checked_mul(rate).map(Money)
    }

    /// Sum amounts, stopping at the first overflow.
    pub fn try_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.try_add(&m))
    }

    /// Round to cents, halves away from zero.
    pub fn round_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("${}", self.display_amount())
    }

    /// Format without symbol, always with two decimals (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let mut rounded = self.round_cents().0;
        rounded.rescale(CENT_PLACES);
        rounded.to_string()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
