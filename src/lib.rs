#![doc(test(attr(deny(warnings))))]

//! Expense Glow keeps an in-memory list of expenses, groups them by day and
//! month, warns as the month's spend approaches a configurable limit, and
//! animates the running total shown to the user.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod store;
pub mod utils;

pub use crate::core::{ExpenseTracker, MonthlyLimit, WarningTier};
pub use domain::{Amount, ExpenseId, ExpenseRecord, MonthKey};
pub use errors::{TrackerError, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Glow tracing initialized.");
    });
}
