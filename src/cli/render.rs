use std::fmt::Write as _;

use colored::{Color, ColoredString, Colorize};
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::{
    config::Config,
    core::{ExpenseTracker, LimitAlert, WarningTier},
    currency::{day_label, format_amount, format_percentage},
    domain::{Amount, ExpenseRecord},
};

const BAR_WIDTH: usize = 30;

fn tier_color(tier: WarningTier) -> Color {
    match tier {
        WarningTier::Normal => Color::Cyan,
        WarningTier::Warning => Color::Yellow,
        WarningTier::Critical | WarningTier::Exceeded => Color::Red,
    }
}

fn heading(text: &str) -> ColoredString {
    text.bold().underline()
}

pub fn dashboard(tracker: &ExpenseTracker, config: &Config) -> String {
    let mut out = String::new();
    let month = tracker.selected_month();
    let _ = writeln!(out, "{}", "Expense Glow".bold());
    let _ = writeln!(
        out,
        "Total Expenses - {}    Limit: {}",
        month.label(),
        format_amount(tracker.monthly_limit().amount(), &config.currency_symbol)
    );
    out
}

pub fn total_line(total: Amount, config: &Config) -> String {
    format!("  {}", format_amount(total, &config.currency_symbol).bold())
}

fn progress_bar(filled_percent: Decimal) -> String {
    let filled = (filled_percent * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn expense_line(record: &ExpenseRecord, symbol: &str) -> String {
    let (r, g, b) = record.color().rgb();
    format!(
        "    {} {:<6} {:<28} {:>12}",
        "●".truecolor(r, g, b),
        record.id().to_string(),
        record.name(),
        format_amount(record.price(), symbol)
    )
}

fn optional_amount(value: Option<Amount>, symbol: &str) -> String {
    value.map_or_else(|| "n/a".to_string(), |amount| format_amount(amount, symbol))
}

pub fn details(tracker: &ExpenseTracker, config: &Config) -> String {
    let symbol = config.currency_symbol.as_str();
    let evaluation = tracker.last_refresh().evaluation;
    let color = tier_color(evaluation.tier);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "  {}  {} of limit",
        progress_bar(evaluation.clamped_percentage()).color(color),
        format_percentage(evaluation.percentage)
    );
    let balance = match (evaluation.remaining(), evaluation.overage()) {
        (Some(left), _) => format!("{} remaining", format_amount(left, symbol)),
        (None, Some(over)) => format!("{} over budget", format_amount(over, symbol)),
        (None, None) => String::new(),
    };
    let _ = writeln!(
        out,
        "  {}    Status: {}",
        balance.color(color),
        evaluation.tier.to_string().color(color).bold()
    );

    let today = tracker.today_view();
    let _ = writeln!(out, "\n{}", heading("Today's Expenses"));
    if today.records.is_empty() {
        let _ = writeln!(out, "    No expenses added today. Start tracking!");
    }
    for record in &today.records {
        let _ = writeln!(out, "{}", expense_line(record, symbol));
    }

    let month = tracker.selected_month_view();
    let _ = writeln!(out, "\n{}", heading(&format!("{} Expenses", month.key.label())));
    if month.records.is_empty() {
        let _ = writeln!(out, "    No expenses recorded for this month.");
    } else {
        let _ = writeln!(
            out,
            "    {} items, average {} per active day, highest {}, lowest {}",
            month.count(),
            optional_amount(month.stats.average_per_active_day.map(Amount::round_cents), symbol),
            optional_amount(month.stats.highest, symbol),
            optional_amount(month.stats.lowest, symbol)
        );
    }

    let _ = writeln!(out, "\n{}", heading("Monthly Summary"));
    for summary in tracker.monthly_summaries() {
        let count = summary.count();
        let _ = writeln!(
            out,
            "    {:<16} {:>12}   {} expense{}",
            summary.key.label(),
            format_amount(summary.total(), symbol),
            count,
            if count == 1 { "" } else { "s" }
        );
    }

    let _ = writeln!(out, "\n{}", heading("Daily Breakdown"));
    for day in tracker.history() {
        let _ = writeln!(
            out,
            "  {}  {} ({} item{})",
            day_label(day.date, tracker.today()).bold(),
            format_amount(day.total, symbol),
            day.count(),
            if day.count() == 1 { "" } else { "s" }
        );
        for record in &day.records {
            let _ = writeln!(out, "{}", expense_line(record, symbol));
        }
    }
    out
}

pub fn alerts(alerts: &[LimitAlert], config: &Config) -> String {
    let mut out = String::new();
    for alert in alerts {
        let color = tier_color(alert.tier());
        let _ = writeln!(
            out,
            "\n{} {}",
            alert.title().color(color).bold(),
            alert.message(&config.currency_symbol)
        );
    }
    out
}

/// Confirmation shown after the limit changes.
pub fn limit_updated(limit: Amount, config: &Config) -> String {
    format!(
        "{} New monthly limit set to {}",
        "Monthly Limit Updated:".bold(),
        format_amount(limit, &config.currency_symbol)
    )
}

/// Quick-select limits from the configuration, marking the one in force.
pub fn presets(current: Amount, config: &Config) -> String {
    let choices: Vec<String> = config
        .preset_limits
        .iter()
        .map(|preset| {
            let label = format_amount(*preset, &config.currency_symbol);
            if *preset == current {
                format!("{label} (current)")
            } else {
                label
            }
        })
        .collect();
    if choices.is_empty() {
        return "No preset limits configured.".to_string();
    }
    format!("Preset limits: {}", choices.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_mark_the_current_limit() {
        colored::control::set_override(false);
        let config = Config::default();
        assert_eq!(
            presets(Amount::from_units(15_000), &config),
            "Preset limits: ₹5,000, ₹10,000, ₹15,000 (current), ₹20,000, ₹25,000, ₹30,000"
        );
        let empty = Config {
            preset_limits: Vec::new(),
            ..Config::default()
        };
        assert_eq!(presets(Amount::from_units(15_000), &empty), "No preset limits configured.");
    }

    #[test]
    fn limit_confirmation_names_new_value() {
        colored::control::set_override(false);
        assert_eq!(
            limit_updated(Amount::from_units(20_000), &Config::default()),
            "Monthly Limit Updated: New monthly limit set to ₹20,000"
        );
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        colored::control::set_override(false);
        assert_eq!(progress_bar(Decimal::ZERO), format!("[{}]", "-".repeat(30)));
        assert_eq!(
            progress_bar(Decimal::from(50)),
            format!("[{}{}]", "#".repeat(15), "-".repeat(15))
        );
        assert_eq!(progress_bar(Decimal::from(100)), format!("[{}]", "#".repeat(30)));
    }
}
