//! Core data models for MoneyTrack
//!
//! Expenses, categories, amounts, identifiers and the time ranges used to
//! slice expenses for reports.

pub mod category;
pub mod currency;
pub mod expense;
pub mod ids;
pub mod money;
pub mod range;

pub use category::{
    default_categories, Category, CategoryValidationError, CATEGORY_COLOR_PALETTE,
    DEFAULT_CATEGORIES,
};
pub use currency::{format_amount, CurrencyCode, CurrencyCodeError, SUPPORTED_CURRENCIES};
pub use expense::{parse_expense_date, Expense, ExpenseValidationError};
pub use ids::{CategoryId, ExpenseId};
pub use money::{Money, MoneyParseError};
pub use range::{DateRange, RangeError, TimeRange};
