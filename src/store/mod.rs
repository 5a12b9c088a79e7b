//! In-memory record store.
//!
//! The store exclusively owns every [`ExpenseRecord`]. Callers only ever see
//! shared references or clones; the only mutations are insert-at-front and
//! delete-by-id.

pub mod seed;

use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::{
    domain::{Amount, ExpenseColor, ExpenseId, ExpenseRecord},
    errors::ValidationError,
};

/// Caller-supplied part of an expense, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    name: String,
    price: Amount,
}

impl NewExpense {
    /// Trims `name` and checks `name` is non-empty and
    /// `0 < price <= Amount::max_input()`.
    pub fn new(name: impl AsRef<str>, price: Amount) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !price.is_positive() {
            return Err(ValidationError::NonPositivePrice(price));
        }
        if price > Amount::max_input() {
            return Err(ValidationError::PriceTooLarge {
                value: price,
                maximum: Amount::max_input(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Amount {
        self.price
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    records: VecDeque<ExpenseRecord>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Builds a store holding `records` in the given order. Ids allocated
    /// afterwards start above the largest seeded id.
    pub fn with_records(records: impl IntoIterator<Item = ExpenseRecord>) -> Self {
        let records: VecDeque<ExpenseRecord> = records.into_iter().collect();
        let next_id = records
            .iter()
            .map(|record| record.id().get())
            .max()
            .map_or(1, |max| max + 1);
        Self { records, next_id }
    }

    /// Stores a new record at the front and returns a copy of it.
    pub fn insert(
        &mut self,
        expense: NewExpense,
        date: NaiveDate,
        color: ExpenseColor,
    ) -> ExpenseRecord {
        let id = ExpenseId::new(self.next_id);
        self.next_id += 1;
        let record = ExpenseRecord::new(id, expense.name, expense.price, date, color);
        self.records.push_front(record.clone());
        record
    }

    /// Removes the record with `id`. Returns `false` when no such record exists.
    pub fn delete(&mut self, id: ExpenseId) -> bool {
        match self.records.iter().position(|record| record.id() == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
