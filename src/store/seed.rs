use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::domain::{Amount, ExpenseColor, ExpenseId, ExpenseRecord};

/// `(days before today, name, price)` for the demo data set.
const MOCK_EXPENSES: [(i64, &str, i64); 12] = [
    (0, "Coffee & Pastry", 250),
    (0, "Lunch at Restaurant", 480),
    (0, "Auto Rickshaw", 120),
    (1, "Grocery Shopping", 1_850),
    (1, "Movie Tickets", 600),
    (1, "Petrol Fill-up", 2_200),
    (2, "Pharmacy", 380),
    (2, "Netflix Subscription", 649),
    (7, "Books from Amazon", 1_200),
    (7, "Dinner with Friends", 1_800),
    (14, "Clothing Shopping", 3_500),
    (14, "Internet Bill", 999),
];

/// Demo expenses dated relative to `today`, with ids `1..=12`.
pub fn mock_records<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<ExpenseRecord> {
    MOCK_EXPENSES
        .iter()
        .zip(1u64..)
        .map(|(&(days_back, name, price), id)| {
            ExpenseRecord::new(
                ExpenseId::new(id),
                name.to_string(),
                Amount::from_units(price),
                today - Duration::days(days_back),
                ExpenseColor::random(rng),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn mock_data_is_anchored_on_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let records = mock_records(today, &mut StdRng::seed_from_u64(1));
        assert_eq!(records.len(), 12);
        assert_eq!(records.iter().filter(|r| r.date() == today).count(), 3);
        let oldest = records.iter().map(ExpenseRecord::date).min().unwrap();
        assert_eq!(oldest, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        let total: Amount = records.iter().map(ExpenseRecord::price).sum();
        assert_eq!(total, Amount::from_units(14_028));
    }
}
