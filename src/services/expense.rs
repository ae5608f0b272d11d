//! Expense service
//!
//! Validation, listing and audited mutations for expenses. The category an
//! expense points at is not checked here; unknown categories are tolerated and
//! simply left out of category breakdowns.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{CategoryId, DateRange, Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Default number of expenses shown as "recent"
pub const DEFAULT_RECENT_LIMIT: usize = 5;

pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for narrowing an expense listing
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive text matched against description and notes
    pub search: Option<String>,
    pub category_id: Option<CategoryId>,
    pub range: Option<DateRange>,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        self.search
            .as_deref()
            .map_or(true, |term| expense.matches_search(term))
            && self
                .category_id
                .map_or(true, |id| expense.category_id == id)
            && self
                .range
                .map_or(true, |range| range.contains_date(expense.date))
    }
}

#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    pub category_id: CategoryId,
    pub notes: Option<String>,
}

/// Fields to change on an existing expense; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateExpenseInput) -> MoneyTrackResult<Expense> {
        let mut expense = Expense::new(
            input.amount,
            input.description.trim(),
            input.date,
            input.category_id,
        );
        if let Some(notes) = input.notes {
            expense = expense.with_notes(notes.trim());
        }

        expense
            .validate()
            .map_err(|e| MoneyTrackError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        tracing::info!(id = %expense.id, amount = %expense.amount, "expense created");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> MoneyTrackResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find by full UUID or short display ID
    pub fn find(&self, identifier: &str) -> MoneyTrackResult<Option<Expense>> {
        self.storage.expenses.find(identifier)
    }

    /// Like [`find`](Self::find) but a missing expense is an error
    pub fn require(&self, identifier: &str) -> MoneyTrackResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| MoneyTrackError::expense_not_found(identifier))
    }

    /// Matching expenses, newest first
    pub fn list(&self, filter: ExpenseFilter) -> MoneyTrackResult<Vec<Expense>> {
        let candidates = match filter.category_id {
            Some(category_id) => self.storage.expenses.get_by_category(category_id)?,
            None => self.storage.expenses.get_all()?,
        };

        let mut expenses: Vec<Expense> = candidates
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();

        sort_newest_first(&mut expenses);

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// The `limit` most recent expenses
    pub fn recent(&self, limit: usize) -> MoneyTrackResult<Vec<Expense>> {
        self.list(ExpenseFilter::new().limit(limit))
    }

    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> MoneyTrackResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| MoneyTrackError::expense_not_found(id.to_string()))?;

        let before = expense.clone();

        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(description) = input.description {
            expense.description = description.trim().to_string();
        }
        if let Some(date) = input.date {
            expense.date = date;
        }
        if let Some(category_id) = input.category_id {
            expense.category_id = category_id;
        }
        if let Some(notes) = input.notes {
            expense = expense.with_notes(notes.unwrap_or_default().trim());
        }

        expense
            .validate()
            .map_err(|e| MoneyTrackError::Validation(e.to_string()))?;

        expense.updated_at = Utc::now();

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    pub fn delete(&self, id: ExpenseId) -> MoneyTrackResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| MoneyTrackError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        tracing::info!(id = %expense.id, "expense deleted");
        Ok(expense)
    }

    pub fn count(&self) -> MoneyTrackResult<usize> {
        self.storage.expenses.count()
    }
}

/// Latest date first; same-day expenses by creation time, newest first
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
