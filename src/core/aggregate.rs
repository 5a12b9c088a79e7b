//! Statistics over a bucket of expense records.
//!
//! Sums are exact decimal additions, so the result does not depend on the
//! order records are visited in. Statistics that are meaningless for an empty
//! bucket are `None` rather than zero, letting callers tell "no data" apart
//! from "zero spend".

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{Amount, ExpenseRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BucketStats {
    pub total: Amount,
    pub count: usize,
    /// `total` divided by the number of distinct dates present.
    pub average_per_active_day: Option<Amount>,
    pub highest: Option<Amount>,
    pub lowest: Option<Amount>,
}

impl BucketStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut stats = BucketStats::default();
        let mut active_days = BTreeSet::new();

        for record in records {
            let price = record.price();
            stats.total += price;
            stats.count += 1;
            active_days.insert(record.date());
            stats.highest = Some(stats.highest.map_or(price, |current| current.max(price)));
            stats.lowest = Some(stats.lowest.map_or(price, |current| current.min(price)));
        }

        stats.average_per_active_day = stats.total.checked_div_count(active_days.len());
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Sum of prices.
pub fn total<'a, I>(records: I) -> Amount
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records.into_iter().map(ExpenseRecord::price).sum()
}
