use std::result::Result as StdResult;

use thiserror::Error;

use crate::domain::Amount;

/// Input rejected at the tracker boundary; nothing reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Expense name must not be empty")]
    EmptyName,
    #[error("Expense price must be greater than 0 (got {0})")]
    NonPositivePrice(Amount),
    #[error("Expense price must not exceed {maximum} (got {value})")]
    PriceTooLarge { value: Amount, maximum: Amount },
    #[error("Monthly limit must be greater than 0 (got {0})")]
    NonPositiveLimit(Amount),
    #[error("Monthly limit should be at least {minimum} (got {value})")]
    LimitBelowMinimum { value: Amount, minimum: Amount },
    #[error("Monthly limit must not exceed {maximum} (got {value})")]
    LimitTooLarge { value: Amount, maximum: Amount },
    #[error("Month must be between 1 and 12 (got {0})")]
    InvalidMonth(u32),
    #[error("Year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
    #[error("Invalid month `{0}`, expected YYYY-MM")]
    InvalidMonthKey(String),
}

/// Error type surfaced by [`crate::core::tracker::ExpenseTracker`].
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failures while loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration directory could not be resolved")]
    NoBaseDir,
}

pub type Result<T> = StdResult<T, TrackerError>;
