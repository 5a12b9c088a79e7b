//! Value types shared by the store, the aggregation engine, and the CLI.

pub mod expense;
pub mod money;
pub mod period;

pub use expense::{ExpenseColor, ExpenseId, ExpenseRecord};
pub use money::Amount;
pub use period::MonthKey;
