//! Spending reports
//!
//! Everything here works on snapshots of the expense and category
//! collections and never touches storage.

pub mod breakdown;
pub mod summary;
pub mod trend;

pub use breakdown::{
    expenses_in_range, group_by_category, percentage_of, total_amount, CategoryBreakdownReport,
    CategoryTotal,
};
pub use summary::MonthlySummary;
pub use trend::{DailyRollup, YearlyRollup};
