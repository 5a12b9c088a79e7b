//! Presentation helpers for amounts, percentages, and dates.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::Amount;

/// Formats `amount` with thousands separators, e.g. `₹15,000` or `₹1,234.50`.
/// Cents are only shown when non-zero.
pub fn format_amount(amount: Amount, symbol: &str) -> String {
    let rounded = amount.round_cents().value();
    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let cents = ((magnitude - whole) * Decimal::ONE_HUNDRED).trunc();

    let mut out = String::new();
    if rounded < Decimal::ZERO {
        out.push('-');
    }
    out.push_str(symbol);
    out.push_str(&group_thousands(&whole.normalize().to_string()));
    if !cents.is_zero() {
        out.push_str(&format!(".{:0>2}", cents.normalize().to_string()));
    }
    out
}

/// Like [`format_amount`], rounded to whole currency units first.
pub fn format_whole(amount: Amount, symbol: &str) -> String {
    format_amount(amount.round_units(), symbol)
}

/// One decimal place, e.g. `83.3%`.
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{:.1}%", percentage.round_dp(1))
}

/// `Today`, `Yesterday`, or a long date; the year is only shown when it
/// differs from `today`'s.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".into()
    } else if date == today - Duration::days(1) {
        "Yesterday".into()
    } else if date.year() == today.year() {
        date.format("%A, %B %-d").to_string()
    } else {
        date.format("%A, %B %-d, %Y").to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
