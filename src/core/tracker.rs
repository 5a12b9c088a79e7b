use chrono::NaiveDate;
use rand::{rngs::StdRng, SeedableRng};

use super::{
    limit::{self, LimitAlert, LimitEvaluation, LimitMonitor, MonthlyLimit},
    partition::{self, DayBucket, MonthBucket},
    time::Clock,
};
use crate::{
    config::Config,
    domain::{Amount, ExpenseColor, ExpenseId, ExpenseRecord, MonthKey},
    errors::Result,
    store::{seed, NewExpense, RecordStore},
};

/// Outcome of re-deriving the selected month after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh {
    pub month: MonthKey,
    /// True total the animated counter should move toward.
    pub total: Amount,
    pub evaluation: LimitEvaluation,
    pub alert: Option<LimitAlert>,
}

/// Owns the record store, the monthly limit, and the selected month.
///
/// Every mutation (records, limit, selected month) re-evaluates the limit for
/// the selected month. Alerts raised by tier changes queue up until
/// [`drain_alerts`](Self::drain_alerts) is called.
pub struct ExpenseTracker {
    store: RecordStore,
    limit: MonthlyLimit,
    selected: MonthKey,
    monitor: LimitMonitor,
    clock: Box<dyn Clock>,
    rng: StdRng,
    last_refresh: Refresh,
    pending_alerts: Vec<LimitAlert>,
}

impl ExpenseTracker {
    pub fn new(clock: Box<dyn Clock>, limit: MonthlyLimit) -> Self {
        Self::with_store(clock, limit, RecordStore::new(), StdRng::from_entropy())
    }

    /// Builds a tracker from configuration, seeding demo data if enabled.
    pub fn from_config(config: &Config, clock: Box<dyn Clock>) -> Result<Self> {
        let limit = MonthlyLimit::new(config.monthly_limit)?;
        let mut rng = StdRng::from_entropy();
        let store = if config.seed_mock_data {
            RecordStore::with_records(seed::mock_records(clock.today(), &mut rng))
        } else {
            RecordStore::new()
        };
        Ok(Self::with_store(clock, limit, store, rng))
    }

    pub fn with_store(
        clock: Box<dyn Clock>,
        limit: MonthlyLimit,
        store: RecordStore,
        rng: StdRng,
    ) -> Self {
        let selected = MonthKey::of(clock.today());
        let evaluation = limit::evaluate(Amount::ZERO, limit);
        let mut tracker = Self {
            store,
            limit,
            selected,
            monitor: LimitMonitor::new(),
            clock,
            rng,
            last_refresh: Refresh {
                month: selected,
                total: Amount::ZERO,
                evaluation,
                alert: None,
            },
            pending_alerts: Vec::new(),
        };
        tracker.refresh();
        tracker
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn monthly_limit(&self) -> MonthlyLimit {
        self.limit
    }

    pub fn selected_month(&self) -> MonthKey {
        self.selected
    }

    pub fn records(&self) -> impl Iterator<Item = &ExpenseRecord> + '_ {
        self.store.iter()
    }

    pub fn record(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.store.get(id)
    }

    pub fn last_refresh(&self) -> &Refresh {
        &self.last_refresh
    }

    /// Takes the alerts raised since the previous call, oldest first.
    pub fn drain_alerts(&mut self) -> Vec<LimitAlert> {
        std::mem::take(&mut self.pending_alerts)
    }

    /// Validates and stores a new expense dated today.
    pub fn add_record(&mut self, name: &str, price: Amount) -> Result<ExpenseRecord> {
        let expense = NewExpense::new(name, price)?;
        let color = ExpenseColor::random(&mut self.rng);
        let record = self.store.insert(expense, self.clock.today(), color);
        tracing::info!(
            id = record.id().get(),
            name = record.name(),
            price = %record.price(),
            "expense added"
        );
        self.refresh();
        Ok(record)
    }

    /// Returns `false` when no record with `id` exists.
    pub fn delete_record(&mut self, id: ExpenseId) -> bool {
        if !self.store.delete(id) {
            tracing::debug!(id = id.get(), "delete ignored, no such expense");
            return false;
        }
        tracing::info!(id = id.get(), "expense deleted");
        self.refresh();
        true
    }

    pub fn set_monthly_limit(&mut self, value: Amount) -> Result<()> {
        self.apply_limit(MonthlyLimit::new(value)?);
        Ok(())
    }

    /// Replaces the limit with one already validated, e.g. by a
    /// [`LimitPolicy`](super::limit::LimitPolicy).
    pub fn apply_limit(&mut self, limit: MonthlyLimit) {
        tracing::info!(limit = %limit.amount(), "monthly limit updated");
        self.limit = limit;
        self.refresh();
    }

    pub fn select_month(&mut self, month: MonthKey) {
        self.selected = month;
        self.refresh();
    }

    pub fn next_month(&mut self) -> MonthKey {
        self.select_month(self.selected.next());
        self.selected
    }

    pub fn previous_month(&mut self) -> MonthKey {
        self.select_month(self.selected.previous());
        self.selected
    }

    pub fn month_view(&self, month: MonthKey) -> MonthBucket<'_> {
        partition::month_bucket(self.store.iter(), month)
    }

    pub fn selected_month_view(&self) -> MonthBucket<'_> {
        self.month_view(self.selected)
    }

    pub fn day_view(&self, date: NaiveDate) -> DayBucket<'_> {
        partition::day_bucket(self.store.iter(), date)
    }

    pub fn today_view(&self) -> DayBucket<'_> {
        self.day_view(self.clock.today())
    }

    /// Every record grouped by day, latest first.
    pub fn history(&self) -> Vec<DayBucket<'_>> {
        partition::group_by_day(self.store.iter())
    }

    /// Per-month totals across all records, latest month first.
    pub fn monthly_summaries(&self) -> Vec<MonthBucket<'_>> {
        partition::group_by_month(self.store.iter())
    }

    /// Classifies `month`'s total against the current limit. Does not touch
    /// the alert state.
    pub fn evaluate_limit(&self, month: MonthKey) -> LimitEvaluation {
        let total = partition::month_bucket(self.store.iter(), month).total();
        limit::evaluate(total, self.limit)
    }

    /// Re-derives the selected month's total and limit tier, queueing an
    /// alert when the tier differs from the previous refresh.
    pub fn refresh(&mut self) -> &Refresh {
        let evaluation = self.evaluate_limit(self.selected);
        let alert = self.monitor.observe(evaluation);
        if let Some(alert) = alert {
            if alert.is_escalation() {
                tracing::warn!(
                    month = %self.selected,
                    from = %alert.previous,
                    to = %alert.tier(),
                    total = %evaluation.total,
                    "monthly limit tier escalated"
                );
            } else {
                tracing::info!(
                    month = %self.selected,
                    from = %alert.previous,
                    to = %alert.tier(),
                    "monthly limit tier eased"
                );
            }
            self.pending_alerts.push(alert);
        }
        self.last_refresh = Refresh {
            month: self.selected,
            total: evaluation.total,
            evaluation,
            alert,
        };
        &self.last_refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{limit::WarningTier, time::FixedClock};

    fn tracker(limit_units: i64) -> ExpenseTracker {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        let limit = MonthlyLimit::new(Amount::from_units(limit_units)).unwrap();
        ExpenseTracker::with_store(
            Box::new(clock),
            limit,
            RecordStore::new(),
            StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn add_and_delete_refresh_the_total() {
        let mut tracker = tracker(15_000);
        let record = tracker.add_record("Lunch", Amount::from_units(480)).unwrap();
        assert_eq!(tracker.last_refresh().total, Amount::from_units(480));
        assert!(tracker.delete_record(record.id()));
        assert_eq!(tracker.last_refresh().total, Amount::ZERO);
        assert!(!tracker.delete_record(record.id()));
    }

    #[test]
    fn invalid_input_never_reaches_the_store() {
        let mut tracker = tracker(15_000);
        assert!(tracker.add_record("  ", Amount::from_units(10)).is_err());
        assert!(tracker.add_record("Tea", Amount::ZERO).is_err());
        assert_eq!(tracker.records().count(), 0);
        assert!(tracker.set_monthly_limit(Amount::ZERO).is_err());
        assert_eq!(tracker.monthly_limit().amount(), Amount::from_units(15_000));
    }

    #[test]
    fn limit_change_reclassifies_without_new_records() {
        let mut tracker = tracker(15_000);
        tracker.add_record("Rent share", Amount::from_units(9_000)).unwrap();
        assert_eq!(tracker.last_refresh().evaluation.tier, WarningTier::Normal);
        tracker.set_monthly_limit(Amount::from_units(10_000)).unwrap();
        assert_eq!(tracker.last_refresh().evaluation.tier, WarningTier::Warning);
        assert_eq!(tracker.drain_alerts().len(), 1);
        assert!(tracker.drain_alerts().is_empty());
    }

    #[test]
    fn navigating_months_changes_the_evaluated_total() {
        let mut tracker = tracker(1_000);
        tracker.add_record("Gadget", Amount::from_units(1_200)).unwrap();
        assert_eq!(tracker.last_refresh().evaluation.tier, WarningTier::Exceeded);
        let previous = tracker.previous_month();
        assert_eq!(previous, MonthKey::new(2026, 9).unwrap());
        assert_eq!(tracker.last_refresh().total, Amount::ZERO);
        assert_eq!(tracker.last_refresh().evaluation.tier, WarningTier::Normal);
        tracker.next_month();
        assert_eq!(tracker.selected_month(), MonthKey::new(2026, 10).unwrap());
        let tiers: Vec<WarningTier> = tracker.drain_alerts().iter().map(|a| a.tier()).collect();
        assert_eq!(
            tiers,
            vec![WarningTier::Exceeded, WarningTier::Normal, WarningTier::Exceeded]
        );
    }
}
