use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// Cells at or above this magnitude are not treated as currency. Keeps any
/// realistic number of summed rows far from `Decimal`'s range.
const MAX_MAGNITUDE: i64 = 1_000_000_000_000_000;

/// A signed currency amount held at cents precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(round_cents(decimal))
    }

    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn zero() -> Self {
        Money::from_cents(0)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Re-rounds to cents. Idempotent.
    pub fn round(self) -> Self {
        Money(round_cents(self.0))
    }

    /// Parses a currency-formatted cell such as `"$1,234.56"` or `"-42.50"`.
    ///
    /// Blank text is zero. Text that is not a number after stripping currency
    /// symbols and thousands separators yields `None`, as does a magnitude of
    /// 1e15 or more.
    pub fn parse_currency(s: &str) -> Option<Money> {
        let s = s.trim();
        if s.is_empty() {
            return Some(Money::zero());
        }
        let cleaned = s.replace(['$', '€', '£', ',', ' '], "");
        let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
        Decimal::from_str(cleaned)
            .or_else(|_| Decimal::from_scientific(cleaned))
            .ok()
            .filter(|d| d.abs() < Decimal::from(MAX_MAGNITUDE))
            .map(Money::from_decimal)
    }

    /// Rounded sum of a sequence of amounts.
    pub fn total<I: IntoIterator<Item = Money>>(amounts: I) -> Money {
        amounts
            .into_iter()
            .fold(Money::zero(), |a, b| a + b)
            .round()
    }
}

/// Rounds half away from zero and pins the scale at two places, so equal
/// amounts share one representation.
fn round_cents(d: Decimal) -> Decimal {
    let mut rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            write!(f, "-${:.2}", self.0.abs())
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money::total(iter)
    }
}
