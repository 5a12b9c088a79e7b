mod common;

use common::{empty_tracker, today, units};
use expense_glow::{
    core::{limit, MonthlyLimit, WarningTier},
    Amount, ExpenseId, MonthKey,
};
use rust_decimal::Decimal;

#[test]
fn three_purchases_today_make_a_day_view() {
    let mut tracker = empty_tracker(15_000);
    let coffee = tracker.add_record("Coffee & Pastry", units(250)).unwrap();
    let lunch = tracker.add_record("Lunch at Restaurant", units(480)).unwrap();
    let ride = tracker.add_record("Auto Rickshaw", units(120)).unwrap();

    let day = tracker.day_view(today());
    assert_eq!(day.total, units(850));
    assert_eq!(day.count(), 3);
    let order: Vec<ExpenseId> = day.records.iter().map(|r| r.id()).collect();
    assert_eq!(order, vec![ride.id(), lunch.id(), coffee.id()]);
    assert_eq!(tracker.today_view(), day);
}

#[test]
fn limit_scenarios_at_fifteen_thousand() {
    let limit = MonthlyLimit::new(units(15_000)).unwrap();

    let warning = limit::evaluate(units(12_500), limit);
    assert_eq!(warning.tier, WarningTier::Warning);
    assert_eq!(warning.remaining(), Some(units(2_500)));

    let critical = limit::evaluate(units(14_300), limit);
    assert_eq!(critical.tier, WarningTier::Critical);
    assert_eq!(critical.remaining(), Some(units(700)));

    let exceeded = limit::evaluate(units(15_600), limit);
    assert_eq!(exceeded.tier, WarningTier::Exceeded);
    assert_eq!(exceeded.overage(), Some(units(600)));
    assert_eq!(exceeded.percentage, Decimal::from(104));
}

#[test]
fn evaluation_is_pure() {
    let limit = MonthlyLimit::new(units(15_000)).unwrap();
    assert_eq!(
        limit::evaluate(units(14_300), limit),
        limit::evaluate(units(14_300), limit)
    );
}

#[test]
fn notification_fires_once_per_transition() {
    let mut tracker = empty_tracker(15_000);
    tracker.add_record("Groceries", units(5_000)).unwrap();
    assert!(tracker.drain_alerts().is_empty());

    tracker.add_record("Laptop repair", units(7_500)).unwrap();
    tracker.add_record("Snacks", units(100)).unwrap();
    tracker.select_month(tracker.selected_month());

    let alerts = tracker.drain_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].tier(), WarningTier::Warning);
    assert_eq!(alerts[0].previous, WarningTier::Normal);
}

#[test]
fn delete_walks_the_tier_back_down() {
    let mut tracker = empty_tracker(15_000);
    tracker.add_record("Rent share", units(12_000)).unwrap();
    let splurge = tracker.add_record("Concert", units(3_000)).unwrap();
    assert_eq!(tracker.last_refresh().evaluation.tier, WarningTier::Exceeded);

    assert!(tracker.delete_record(splurge.id()));
    assert_eq!(tracker.last_refresh().evaluation.tier, WarningTier::Warning);
    let tiers: Vec<WarningTier> = tracker.drain_alerts().iter().map(|a| a.tier()).collect();
    assert_eq!(tiers, vec![WarningTier::Warning, WarningTier::Exceeded, WarningTier::Warning]);
}

#[test]
fn re_adding_a_deleted_expense_gets_a_fresh_id() {
    let mut tracker = empty_tracker(15_000);
    let first = tracker.add_record("Chai", units(20)).unwrap();
    assert!(tracker.delete_record(first.id()));
    let second = tracker.add_record("Chai", units(20)).unwrap();
    assert_ne!(first.id(), second.id());
    assert_eq!(first.name(), second.name());
    assert!(!tracker.delete_record(first.id()));
}

#[test]
fn month_view_decomposes_into_day_totals() {
    let mut tracker = empty_tracker(15_000);
    for (name, price) in [("Bus", 40), ("Books", 1_200), ("Fruit", 180)] {
        tracker.add_record(name, units(price)).unwrap();
    }
    let month = tracker.month_view(MonthKey::of(today()));
    let from_days: Amount = month.days.iter().map(|day| day.total).sum();
    assert_eq!(from_days, month.total());
    assert_eq!(month.count(), 3);
    assert_eq!(month.stats.average_per_active_day, Some(units(1_420)));
    assert_eq!(month.stats.highest, Some(units(1_200)));
    assert_eq!(month.stats.lowest, Some(units(40)));
}

#[test]
fn empty_month_has_no_statistics() {
    let tracker = empty_tracker(15_000);
    let month = tracker.month_view(MonthKey::new(2026, 2).unwrap());
    assert_eq!(month.total(), Amount::ZERO);
    assert_eq!(month.count(), 0);
    assert!(month.days.is_empty());
    assert_eq!(month.stats.average_per_active_day, None);
    assert_eq!(month.stats.highest, None);
}

#[test]
fn records_keep_their_color() {
    let mut tracker = empty_tracker(15_000);
    let record = tracker.add_record("Cab", units(300)).unwrap();
    let stored = tracker.record(record.id()).unwrap();
    assert_eq!(stored.color(), record.color());
    assert_eq!(stored.date(), today());
}
