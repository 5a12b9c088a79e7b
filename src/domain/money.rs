use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Largest price or limit accepted from input, in whole units.
pub const MAX_INPUT_UNITS: i64 = 1_000_000_000_000;

/// Monetary amount backed by a decimal so repeated additions never drift.
///
/// Amounts carry no currency; the whole application works in a single one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Whole currency units.
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Upper bound for a single price or the monthly limit.
    pub fn max_input() -> Self {
        Self::from_units(MAX_INPUT_UNITS)
    }

    pub const fn value(self) -> Decimal {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Rounds half away from zero to whole units, the way the display rounds.
    pub fn round_units(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn round_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Scales the amount by `numerator / denominator`.
    ///
    /// Returns `None` when `denominator` is zero.
    pub fn scale(self, numerator: Decimal, denominator: Decimal) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        self.0
            .checked_mul(numerator)
            .and_then(|product| product.checked_div(denominator))
            .map(Self)
    }

    /// Divides by a count, `None` when the count is zero.
    pub fn checked_div_count(self, count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(count)).map(Self)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::from_units(value)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Amount {
    type Output = Amount;

    /// Saturates at the decimal bounds instead of panicking.
    fn add(self, rhs: Amount) -> Amount {
        Amount(saturate(self.0.checked_add(rhs.0), rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    /// Saturates at the decimal bounds instead of panicking.
    fn sub(self, rhs: Amount) -> Amount {
        Amount(saturate(self.0.checked_sub(rhs.0), -rhs.0))
    }
}

fn saturate(result: Option<Decimal>, direction: Decimal) -> Decimal {
    result.unwrap_or(if direction.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
