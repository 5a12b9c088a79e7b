use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Calendar month identified by its `(year, month)` pair.
///
/// The day component is never stored, so month navigation cannot roll a
/// day-31 reference into the following month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Accepts months `1..=12` of years chrono can represent.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        if !(NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
            return Err(ValidationError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn previous(self) -> Self {
        self.shift(-1)
    }

    pub fn shift(self, months: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        Self {
            year: index.div_euclid(12) as i32,
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Long label such as `October 2026`.
    pub fn label(self) -> String {
        match self.first_day() {
            Some(date) => date.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for MonthKey {
    type Err = ValidationError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonthKey(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn navigation_wraps_year_boundaries() {
        let december = MonthKey::new(2025, 12).unwrap();
        assert_eq!(december.next(), MonthKey::new(2026, 1).unwrap());
        assert_eq!(december.next().previous(), december);
        assert_eq!(
            MonthKey::new(2026, 1).unwrap().previous(),
            MonthKey::new(2025, 12).unwrap()
        );
        assert_eq!(december.shift(-24), MonthKey::new(2023, 12).unwrap());
    }

    #[test]
    fn years_outside_calendar_range_are_rejected() {
        assert_eq!(
            MonthKey::new(i32::MAX, 1),
            Err(ValidationError::YearOutOfRange(i32::MAX))
        );
        assert!("2147483647-06".parse::<MonthKey>().is_err());
        let last = MonthKey::of(NaiveDate::MAX);
        assert_eq!(last.next().previous(), last);
        assert_eq!(last.shift(i32::MIN).shift(i32::MAX).next(), last);
    }

    #[test]
    fn day_31_reference_moves_by_exactly_one_month() {
        let january = MonthKey::of(date(2026, 1, 31));
        assert_eq!(january.next(), MonthKey::new(2026, 2).unwrap());
        assert_eq!(january.next().next(), MonthKey::new(2026, 3).unwrap());
    }

    #[test]
    fn contains_compares_year_and_month_only() {
        let key = MonthKey::new(2026, 10).unwrap();
        assert!(key.contains(date(2026, 10, 1)));
        assert!(key.contains(date(2026, 10, 31)));
        assert!(!key.contains(date(2026, 9, 30)));
        assert!(!key.contains(date(2026, 11, 1)));
        assert!(!key.contains(date(2025, 10, 15)));
    }

    #[test]
    fn parses_and_displays_year_month() {
        let key: MonthKey = "2026-03".parse().unwrap();
        assert_eq!(key, MonthKey::new(2026, 3).unwrap());
        assert_eq!(key.to_string(), "2026-03");
        assert_eq!(key.label(), "March 2026");
        assert!("2026-13".parse::<MonthKey>().is_err());
        assert!("march".parse::<MonthKey>().is_err());
    }
}
