//! First-run seeding
//!
//! A store that has never held a category collection gets the default set.
//! An empty but stored collection is left alone: the user deleted them.

use crate::error::MoneyTrackResult;
use crate::models::default_categories;

use super::categories::CategoryRepository;

/// Seed the default categories if none were ever stored
///
/// Returns whether seeding happened.
pub fn seed_default_categories(categories: &CategoryRepository) -> MoneyTrackResult<bool> {
    if categories.is_stored()? {
        return Ok(false);
    }

    let defaults = default_categories();
    tracing::info!(count = defaults.len(), "seeding default categories");
    categories.replace_all(defaults)?;
    categories.save()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::{KeyValueStore, MemoryStore, CATEGORIES_KEY};
    use std::sync::Arc;

    #[test]
    fn test_seeds_fresh_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repo = CategoryRepository::new(store.clone());

        assert!(seed_default_categories(&repo).unwrap());
        assert_eq!(repo.count().unwrap(), 8);
        assert!(store.get(CATEGORIES_KEY).unwrap().is_some());

        assert!(!seed_default_categories(&repo).unwrap());
        assert_eq!(repo.count().unwrap(), 8);
    }

    #[test]
    fn test_empty_stored_collection_is_kept() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(CATEGORIES_KEY, "[]").unwrap();
        let repo = CategoryRepository::new(store);
        repo.load().unwrap();

        assert!(!seed_default_categories(&repo).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
