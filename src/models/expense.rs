//! Expense model
//!
//! An expense is a single spending event. The category reference is not
//! checked when an expense is written; aggregation simply skips expenses whose
//! category no longer exists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Amount spent (never negative)
    pub amount: Money,

    pub description: String,

    /// Calendar date of the expense, stored as `YYYY-MM-DD`
    #[serde(deserialize_with = "deserialize_expense_date")]
    pub date: NaiveDate,

    #[serde(alias = "categoryId")]
    pub category_id: CategoryId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with a fresh ID
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
        category_id: CategoryId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            amount,
            description: description.into(),
            date,
            category_id,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Case-insensitive match against description and notes
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.description.to_lowercase().contains(&term)
            || self
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&term))
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.description, self.amount)
    }
}

/// Parse the date portion of a stored expense date
///
/// Only the first 10 characters are significant, so both `2024-03-01` and
/// `2024-03-01T14:30:00.000Z` read as 1 March 2024.
pub fn parse_expense_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let prefix = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn deserialize_expense_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_expense_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid expense date '{}'", raw)))
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Description is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
