//! Monthly aggregation and limit-warning engine.

pub mod aggregate;
pub mod animator;
pub mod limit;
pub mod partition;
pub mod time;
pub mod tracker;

pub use aggregate::BucketStats;
pub use animator::{AnimatedCounter, CounterAnimation};
pub use limit::{LimitAlert, LimitEvaluation, LimitMonitor, LimitPolicy, MonthlyLimit, WarningTier};
pub use partition::{DayBucket, MonthBucket};
pub use time::{Clock, FixedClock, SystemClock};
pub use tracker::{ExpenseTracker, Refresh};
