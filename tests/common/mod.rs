#![allow(dead_code)]

use chrono::NaiveDate;
use expense_glow::{
    core::{FixedClock, MonthlyLimit},
    store::RecordStore,
    Amount, ExpenseTracker,
};
use rand::{rngs::StdRng, SeedableRng};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

pub fn units(value: i64) -> Amount {
    Amount::from_units(value)
}

/// Empty tracker pinned to [`today`] with a deterministic color sequence.
pub fn empty_tracker(limit: i64) -> ExpenseTracker {
    ExpenseTracker::with_store(
        Box::new(FixedClock(today())),
        MonthlyLimit::new(units(limit)).unwrap(),
        RecordStore::new(),
        StdRng::seed_from_u64(11),
    )
}
