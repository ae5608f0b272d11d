//! Expense repository
//!
//! Holds the expense collection in memory and persists it as a JSON array
//! under the `expenses` key. Stored order is preserved.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{CategoryId, Expense, ExpenseId};

use super::kv::{KeyValueStore, EXPENSES_KEY};

pub struct ExpenseRepository {
    store: Arc<dyn KeyValueStore>,
    expenses: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            expenses: RwLock::new(Vec::new()),
        }
    }

    /// Replace the in-memory collection with the stored one
    pub fn load(&self) -> MoneyTrackResult<()> {
        let loaded: Vec<Expense> = match self.store.get(EXPENSES_KEY)? {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text).map_err(|e| {
                MoneyTrackError::Storage(format!("Failed to parse stored expenses: {}", e))
            })?,
            _ => Vec::new(),
        };

        tracing::debug!(count = loaded.len(), "loaded expenses");
        *self.write_lock()? = loaded;
        Ok(())
    }

    pub fn save(&self) -> MoneyTrackResult<()> {
        let expenses = self.read_lock()?;
        let text = serde_json::to_string_pretty(&*expenses)?;
        self.store.set(EXPENSES_KEY, &text)?;
        tracing::debug!(count = expenses.len(), "saved expenses");
        Ok(())
    }

    pub fn get(&self, id: ExpenseId) -> MoneyTrackResult<Option<Expense>> {
        Ok(self.read_lock()?.iter().find(|e| e.id == id).cloned())
    }

    /// Look up by full UUID or short display ID
    pub fn find(&self, identifier: &str) -> MoneyTrackResult<Option<Expense>> {
        Ok(self
            .read_lock()?
            .iter()
            .find(|e| e.id.matches(identifier))
            .cloned())
    }

    /// Snapshot of every expense in stored order
    pub fn get_all(&self) -> MoneyTrackResult<Vec<Expense>> {
        Ok(self.read_lock()?.clone())
    }

    pub fn get_by_category(&self, category_id: CategoryId) -> MoneyTrackResult<Vec<Expense>> {
        Ok(self
            .read_lock()?
            .iter()
            .filter(|e| e.category_id == category_id)
            .cloned()
            .collect())
    }

    /// Number of expenses referencing a category
    pub fn count_by_category(&self, category_id: CategoryId) -> MoneyTrackResult<usize> {
        Ok(self
            .read_lock()?
            .iter()
            .filter(|e| e.category_id == category_id)
            .count())
    }

    /// Replace the expense with the same ID, or append it
    pub fn upsert(&self, expense: Expense) -> MoneyTrackResult<()> {
        let mut expenses = self.write_lock()?;
        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense,
            None => expenses.push(expense),
        }
        Ok(())
    }

    /// Remove an expense, returning whether it existed
    pub fn delete(&self, id: ExpenseId) -> MoneyTrackResult<bool> {
        let mut expenses = self.write_lock()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        Ok(expenses.len() != before)
    }

    pub fn count(&self) -> MoneyTrackResult<usize> {
        Ok(self.read_lock()?.len())
    }

    fn read_lock(&self) -> MoneyTrackResult<RwLockReadGuard<'_, Vec<Expense>>> {
        self.expenses
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> MoneyTrackResult<RwLockWriteGuard<'_, Vec<Expense>>> {
        self.expenses
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::kv::MemoryStore;
    use chrono::NaiveDate;

    fn expense(cents: i64, category: CategoryId) -> Expense {
        Expense::new(
            Money::from_cents(cents),
            "Test",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            category,
        )
    }

    #[test]
    fn test_upsert_get_delete() {
        let repo = ExpenseRepository::new(Arc::new(MemoryStore::new()));
        let category = CategoryId::new();
        let mut first = expense(500, category);

        repo.upsert(first.clone()).unwrap();
        repo.upsert(expense(700, category)).unwrap();
        assert_eq!(repo.count().unwrap(), 2);

        first.description = "Edited".into();
        repo.upsert(first.clone()).unwrap();
        assert_eq!(repo.count().unwrap(), 2);
        assert_eq!(repo.get(first.id).unwrap().unwrap().description, "Edited");
        assert_eq!(repo.get_all().unwrap()[0].id, first.id);

        assert!(repo.delete(first.id).unwrap());
        assert!(!repo.delete(first.id).unwrap());
        assert!(repo.get(first.id).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repo = ExpenseRepository::new(store.clone());
        let category = CategoryId::new();
        repo.upsert(expense(1250, category)).unwrap();
        repo.save().unwrap();

        let reloaded = ExpenseRepository::new(store);
        reloaded.load().unwrap();
        let all = reloaded.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount.cents(), 1250);
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let repo = ExpenseRepository::new(Arc::new(MemoryStore::new()));
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.set(EXPENSES_KEY, "{not an array").unwrap();
        let repo = ExpenseRepository::new(store);
        assert!(matches!(repo.load(), Err(MoneyTrackError::Storage(_))));
    }

    #[test]
    fn test_out_of_range_stored_amounts_are_rejected() {
        for amount in [serde_json::json!(1e17), serde_json::json!(-12.5)] {
            let mut document = serde_json::to_value(expense(100, CategoryId::new())).unwrap();
            document["amount"] = amount;

            let store = Arc::new(MemoryStore::new());
            store
                .set(EXPENSES_KEY, &serde_json::Value::Array(vec![document]).to_string())
                .unwrap();
            let repo = ExpenseRepository::new(store);
            assert!(matches!(repo.load(), Err(MoneyTrackError::Storage(_))));
        }
    }

    #[test]
    fn test_category_queries() {
        let repo = ExpenseRepository::new(Arc::new(MemoryStore::new()));
        let food = CategoryId::new();
        let travel = CategoryId::new();
        repo.upsert(expense(100, food)).unwrap();
        repo.upsert(expense(200, food)).unwrap();
        repo.upsert(expense(300, travel)).unwrap();

        assert_eq!(repo.count_by_category(food).unwrap(), 2);
        assert_eq!(repo.get_by_category(travel).unwrap().len(), 1);
        assert_eq!(repo.count_by_category(CategoryId::new()).unwrap(), 0);
    }

    #[test]
    fn test_find_by_short_id() {
        let repo = ExpenseRepository::new(Arc::new(MemoryStore::new()));
        let item = expense(100, CategoryId::new());
        repo.upsert(item.clone()).unwrap();

        let found = repo.find(&item.id.short()).unwrap().unwrap();
        assert_eq!(found.id, item.id);
        assert!(repo.find("").unwrap().is_none());
    }
}
