//! Classification of a month's spend against the monthly limit.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{currency, domain::Amount, errors::ValidationError};

/// Percent of the limit at which [`WarningTier::Warning`] starts.
pub const WARNING_PERCENT: i64 = 80;
/// Percent of the limit at which [`WarningTier::Critical`] starts.
pub const CRITICAL_PERCENT: i64 = 95;

/// The single process-wide spending limit. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Amount", into = "Amount")]
pub struct MonthlyLimit(Amount);

impl MonthlyLimit {
    pub fn new(value: Amount) -> Result<Self, ValidationError> {
        if !value.is_positive() {
            return Err(ValidationError::NonPositiveLimit(value));
        }
        if value > Amount::max_input() {
            return Err(ValidationError::LimitTooLarge {
                value,
                maximum: Amount::max_input(),
            });
        }
        Ok(Self(value))
    }

    pub fn amount(self) -> Amount {
        self.0
    }

    /// Scales by a fraction below one, so the product never overflows.
    fn percent_of(self, percent: i64) -> Amount {
        let fraction = Decimal::from(percent) / Decimal::ONE_HUNDRED;
        Amount::new(self.0.value() * fraction)
    }
}

impl TryFrom<Amount> for MonthlyLimit {
    type Error = ValidationError;

    fn try_from(value: Amount) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthlyLimit> for Amount {
    fn from(limit: MonthlyLimit) -> Self {
        limit.0
    }
}

/// Minimum accepted by the limit dialog. The core itself only needs `> 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    minimum: Amount,
}

impl LimitPolicy {
    pub fn new(minimum: Amount) -> Self {
        Self { minimum }
    }

    pub fn minimum(&self) -> Amount {
        self.minimum
    }

    pub fn validate(&self, value: Amount) -> Result<MonthlyLimit, ValidationError> {
        let limit = MonthlyLimit::new(value)?;
        if value < self.minimum {
            return Err(ValidationError::LimitBelowMinimum {
                value,
                minimum: self.minimum,
            });
        }
        Ok(limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WarningTier {
    Normal,
    Warning,
    Critical,
    Exceeded,
}

impl fmt::Display for WarningTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WarningTier::Normal => "Normal",
            WarningTier::Warning => "Warning",
            WarningTier::Critical => "Critical",
            WarningTier::Exceeded => "Exceeded",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LimitBalance {
    /// `limit - total`, strictly positive.
    Remaining(Amount),
    /// `total - limit`, zero or more.
    Overage(Amount),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitEvaluation {
    pub tier: WarningTier,
    pub balance: LimitBalance,
    pub total: Amount,
    pub limit: MonthlyLimit,
    /// `total / limit * 100`, not clamped.
    pub percentage: Decimal,
}

impl LimitEvaluation {
    pub fn remaining(&self) -> Option<Amount> {
        match self.balance {
            LimitBalance::Remaining(amount) => Some(amount),
            LimitBalance::Overage(_) => None,
        }
    }

    pub fn overage(&self) -> Option<Amount> {
        match self.balance {
            LimitBalance::Overage(amount) => Some(amount),
            LimitBalance::Remaining(_) => None,
        }
    }

    /// Percentage capped at 100, for progress indicators.
    pub fn clamped_percentage(&self) -> Decimal {
        self.percentage.min(Decimal::ONE_HUNDRED)
    }
}

/// Classifies `total` against `limit`. Pure: equal inputs give equal output.
pub fn evaluate(total: Amount, limit: MonthlyLimit) -> LimitEvaluation {
    let tier = if total >= limit.amount() {
        WarningTier::Exceeded
    } else if total >= limit.percent_of(CRITICAL_PERCENT) {
        WarningTier::Critical
    } else if total >= limit.percent_of(WARNING_PERCENT) {
        WarningTier::Warning
    } else {
        WarningTier::Normal
    };

    let balance = match tier {
        WarningTier::Exceeded => LimitBalance::Overage(total - limit.amount()),
        _ => LimitBalance::Remaining(limit.amount() - total),
    };

    let percentage = percentage_of(total, limit);

    LimitEvaluation {
        tier,
        balance,
        total,
        limit,
        percentage,
    }
}

/// `total / limit * 100`, saturating at [`Decimal::MAX`] when the ratio does
/// not fit.
fn percentage_of(total: Amount, limit: MonthlyLimit) -> Decimal {
    let (total, limit) = (total.value(), limit.amount().value());
    total
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(limit))
        .or_else(|| {
            total
                .checked_div(limit)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(Decimal::MAX)
}

/// Notification raised when the classified tier changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitAlert {
    pub previous: WarningTier,
    pub evaluation: LimitEvaluation,
}

impl LimitAlert {
    pub fn tier(&self) -> WarningTier {
        self.evaluation.tier
    }

    pub fn is_escalation(&self) -> bool {
        self.evaluation.tier > self.previous
    }

    pub fn title(&self) -> &'static str {
        match self.evaluation.tier {
            WarningTier::Normal => "Back Within Budget",
            WarningTier::Warning => "Warning: Approaching Monthly Limit",
            WarningTier::Critical => "Critical: Monthly Limit Nearly Reached!",
            WarningTier::Exceeded => "Monthly Limit Exceeded!",
        }
    }

    pub fn message(&self, symbol: &str) -> String {
        let limit = currency::format_whole(self.evaluation.limit.amount(), symbol);
        match self.evaluation.balance {
            LimitBalance::Overage(over) => format!(
                "You've exceeded your limit by {}. Consider reviewing your expenses.",
                currency::format_whole(over, symbol)
            ),
            LimitBalance::Remaining(left) => {
                let left = currency::format_whole(left, symbol);
                match self.evaluation.tier {
                    WarningTier::Critical => {
                        format!("Only {left} remaining of your {limit} limit!")
                    }
                    _ => format!("{left} remaining of your {limit} monthly limit."),
                }
            }
        }
    }
}

/// Remembers the tier of the previous evaluation so repeated evaluations in
/// the same tier stay silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitMonitor {
    last_tier: WarningTier,
}

impl Default for LimitMonitor {
    fn default() -> Self {
        Self {
            last_tier: WarningTier::Normal,
        }
    }
}

impl LimitMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_tier(&self) -> WarningTier {
        self.last_tier
    }

    /// Records `evaluation` and returns an alert if its tier differs from the
    /// previously observed one.
    pub fn observe(&mut self, evaluation: LimitEvaluation) -> Option<LimitAlert> {
        let previous = std::mem::replace(&mut self.last_tier, evaluation.tier);
        if previous == evaluation.tier {
            return None;
        }
        Some(LimitAlert {
            previous,
            evaluation,
        })
    }
}
