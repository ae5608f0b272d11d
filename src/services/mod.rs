//! Service layer for MoneyTrack
//!
//! Validation and audited mutations on top of the storage layer.

pub mod category;
pub mod expense;

pub use category::{CategoryService, UpdateCategoryInput};
pub use expense::{
    CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput, DEFAULT_RECENT_LIMIT,
};
