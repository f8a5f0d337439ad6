//! Money amounts in integer cents.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// An amount of money stored as whole cents; displays as `$12.50`.
///
/// Serialized as a decimal dollar number (`12.5`) so menu files read naturally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Money {
    cents: u64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Amount as a dollar float, e.g. for CSV output.
    pub fn as_dollars(self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl From<f64> for Money {
    /// Rounds to the nearest cent; negative and non-finite values become zero.
    fn from(dollars: f64) -> Self {
        if !dollars.is_finite() || dollars <= 0.0 {
            return Money::ZERO;
        }
        Money::from_cents((dollars * 100.0).round() as u64)
    }
}

impl From<Money> for f64 {
    fn from(m: Money) -> f64 {
        m.as_dollars()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, qty: u32) -> Money {
        Money::from_cents(self.cents.saturating_mul(qty as u64))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}
