//! Monetary amounts.

use serde::{Deserialize, Deserializer, Serialize};

use crate::value_object::ValueObject;

/// Non-negative amount in the smallest currency unit (e.g., cents).
///
/// All arithmetic saturates; an amount can never go below zero.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtract, flooring at zero.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    pub fn times(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(quantity)))
    }

    /// `pct` percent of this amount, truncated toward zero.
    pub fn percent_of(self, pct: u8) -> Money {
        let share = u128::from(self.0) * u128::from(pct) / 100;
        Money(u64::try_from(share).unwrap_or(u64::MAX))
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl From<u64> for Money {
    fn from(cents: u64) -> Self {
        Self(cents)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Serde helper: a missing or `null` amount decodes as zero.
pub fn zero_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    Ok(Option::<Money>::deserialize(deserializer)?.unwrap_or_default())
}
