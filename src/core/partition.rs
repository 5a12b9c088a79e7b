//! Calendar partitioning of expense records into day and month buckets.
//!
//! Buckets borrow from the record store and are rebuilt on every call; they
//! never hold state of their own.

use std::{cmp::Reverse, collections::BTreeMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::aggregate::{self, BucketStats};
use crate::domain::{Amount, ExpenseRecord, MonthKey};

/// Records sharing one calendar date, newest id first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub records: Vec<&'a ExpenseRecord>,
    pub total: Amount,
}

impl<'a> DayBucket<'a> {
    fn new(date: NaiveDate, mut records: Vec<&'a ExpenseRecord>) -> Self {
        records.sort_by_key(|record| Reverse(record.id()));
        let total = aggregate::total(records.iter().copied());
        Self {
            date,
            records,
            total,
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Records of one calendar month, with their day buckets (latest date first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket<'a> {
    pub key: MonthKey,
    pub records: Vec<&'a ExpenseRecord>,
    pub days: Vec<DayBucket<'a>>,
    pub stats: BucketStats,
}

impl<'a> MonthBucket<'a> {
    fn new(key: MonthKey, mut records: Vec<&'a ExpenseRecord>) -> Self {
        sort_newest_first(&mut records);
        let stats = BucketStats::from_records(records.iter().copied());
        let days = group_by_day(records.iter().copied());
        Self {
            key,
            records,
            days,
            stats,
        }
    }

    pub fn year(&self) -> i32 {
        self.key.year()
    }

    pub fn month(&self) -> u32 {
        self.key.month()
    }

    pub fn total(&self) -> Amount {
        self.stats.total
    }

    pub fn count(&self) -> usize {
        self.stats.count
    }
}

/// Records dated exactly `date`, newest id first.
pub fn records_on<'a, I>(records: I, date: NaiveDate) -> Vec<&'a ExpenseRecord>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    day_bucket(records, date).records
}

/// Records whose `(year, month)` equals `key`, latest date then newest id first.
pub fn records_in_month<'a, I>(records: I, key: MonthKey) -> Vec<&'a ExpenseRecord>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut selected: Vec<_> = records
        .into_iter()
        .filter(|record| key.contains(record.date()))
        .collect();
    sort_newest_first(&mut selected);
    selected
}

pub fn day_bucket<'a, I>(records: I, date: NaiveDate) -> DayBucket<'a>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let selected = records
        .into_iter()
        .filter(|record| record.date() == date)
        .collect();
    DayBucket::new(date, selected)
}

pub fn month_bucket<'a, I>(records: I, key: MonthKey) -> MonthBucket<'a>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    MonthBucket::new(key, records_in_month(records, key))
}

/// One bucket per distinct date, latest date first.
pub fn group_by_day<'a, I>(records: I) -> Vec<DayBucket<'a>>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut groups: BTreeMap<Reverse<NaiveDate>, Vec<&'a ExpenseRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(Reverse(record.date())).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(Reverse(date), records)| DayBucket::new(date, records))
        .collect()
}

/// One bucket per distinct `(year, month)`, latest month first.
pub fn group_by_month<'a, I>(records: I) -> Vec<MonthBucket<'a>>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut groups: BTreeMap<Reverse<MonthKey>, Vec<&'a ExpenseRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(Reverse(MonthKey::of(record.date())))
            .or_default()
            .push(record);
    }
    groups
        .into_iter()
        .map(|(Reverse(key), records)| MonthBucket::new(key, records))
        .collect()
}

fn sort_newest_first(records: &mut [&ExpenseRecord]) {
    records.sort_by_key(|record| (Reverse(record.date()), Reverse(record.id())));
}
