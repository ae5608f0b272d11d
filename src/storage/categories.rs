//! Category repository
//!
//! Persists the category collection as a JSON array under the `categories`
//! key, preserving stored order.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{Category, CategoryId};

use super::kv::{KeyValueStore, CATEGORIES_KEY};

pub struct CategoryRepository {
    store: Arc<dyn KeyValueStore>,
    categories: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            categories: RwLock::new(Vec::new()),
        }
    }

    /// Whether a category collection has ever been written
    pub fn is_stored(&self) -> MoneyTrackResult<bool> {
        Ok(self.store.get(CATEGORIES_KEY)?.is_some())
    }

    pub fn load(&self) -> MoneyTrackResult<()> {
        let loaded: Vec<Category> = match self.store.get(CATEGORIES_KEY)? {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text).map_err(|e| {
                MoneyTrackError::Storage(format!("Failed to parse stored categories: {}", e))
            })?,
            _ => Vec::new(),
        };

        tracing::debug!(count = loaded.len(), "loaded categories");
        *self.write_lock()? = loaded;
        Ok(())
    }

    pub fn save(&self) -> MoneyTrackResult<()> {
        let categories = self.read_lock()?;
        let text = serde_json::to_string_pretty(&*categories)?;
        self.store.set(CATEGORIES_KEY, &text)?;
        tracing::debug!(count = categories.len(), "saved categories");
        Ok(())
    }

    pub fn get(&self, id: CategoryId) -> MoneyTrackResult<Option<Category>> {
        Ok(self.read_lock()?.iter().find(|c| c.id == id).cloned())
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> MoneyTrackResult<Option<Category>> {
        Ok(self
            .read_lock()?
            .iter()
            .find(|c| c.name_matches(name))
            .cloned())
    }

    /// Look up by name, full UUID or short display ID
    pub fn find(&self, identifier: &str) -> MoneyTrackResult<Option<Category>> {
        if let Some(category) = self.get_by_name(identifier)? {
            return Ok(Some(category));
        }
        Ok(self
            .read_lock()?
            .iter()
            .find(|c| c.id.matches(identifier))
            .cloned())
    }

    pub fn get_all(&self) -> MoneyTrackResult<Vec<Category>> {
        Ok(self.read_lock()?.clone())
    }

    pub fn upsert(&self, category: Category) -> MoneyTrackResult<()> {
        let mut categories = self.write_lock()?;
        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => categories.push(category),
        }
        Ok(())
    }

    /// Replace the whole collection
    pub fn replace_all(&self, categories: Vec<Category>) -> MoneyTrackResult<()> {
        *self.write_lock()? = categories;
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> MoneyTrackResult<bool> {
        let mut categories = self.write_lock()?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() != before)
    }

    pub fn count(&self) -> MoneyTrackResult<usize> {
        Ok(self.read_lock()?.len())
    }

    fn read_lock(&self) -> MoneyTrackResult<RwLockReadGuard<'_, Vec<Category>>> {
        self.categories
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> MoneyTrackResult<RwLockWriteGuard<'_, Vec<Category>>> {
        self.categories
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;

    fn repo() -> (Arc<dyn KeyValueStore>, CategoryRepository) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        (store.clone(), CategoryRepository::new(store))
    }

    #[test]
    fn test_upsert_and_lookup() {
        let (_, repo) = repo();
        let groceries = Category::new("Groceries");
        repo.upsert(groceries.clone()).unwrap();

        assert_eq!(repo.get(groceries.id).unwrap().unwrap().name, "Groceries");
        assert_eq!(repo.get_by_name("GROCERIES").unwrap().unwrap().id, groceries.id);
        assert_eq!(repo.find(&groceries.id.short()).unwrap().unwrap().id, groceries.id);
        assert!(repo.get_by_name("Rent").unwrap().is_none());
    }

    #[test]
    fn test_save_preserves_order() {
        let (store, repo) = repo();
        for name in ["Zoo", "Apples", "Mail"] {
            repo.upsert(Category::new(name)).unwrap();
        }
        assert!(!repo.is_stored().unwrap());
        repo.save().unwrap();
        assert!(repo.is_stored().unwrap());

        let reloaded = CategoryRepository::new(store);
        reloaded.load().unwrap();
        let names: Vec<_> = reloaded.get_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Zoo", "Apples", "Mail"]);
    }

    #[test]
    fn test_delete() {
        let (_, repo) = repo();
        let pets = Category::new("Pets");
        repo.upsert(pets.clone()).unwrap();

        assert!(repo.delete(pets.id).unwrap());
        assert!(!repo.delete(pets.id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
