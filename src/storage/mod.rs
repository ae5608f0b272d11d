//! Storage layer for MoneyTrack
//!
//! Expenses and categories live in a flat key-value store, one JSON array
//! per key. The repositories cache the collections in memory; services call
//! `save` on the affected repository after every mutation.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod kv;

pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::seed_default_categories;
pub use kv::{FileStore, KeyValueStore, MemoryStore, CATEGORIES_KEY, EXPENSES_KEY};

use std::sync::Arc;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::MoneyTrackPaths;
use crate::error::MoneyTrackResult;

/// Owns the repositories and the audit log
pub struct Storage {
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// File-backed storage rooted at `paths`
    pub fn new(paths: MoneyTrackPaths) -> MoneyTrackResult<Self> {
        paths.ensure_directories()?;

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(paths.data_dir()));
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self::with_store(store, Some(audit)))
    }

    /// Storage over any key-value store
    pub fn with_store(store: Arc<dyn KeyValueStore>, audit: Option<AuditLogger>) -> Self {
        Self {
            expenses: ExpenseRepository::new(store.clone()),
            categories: CategoryRepository::new(store),
            audit,
        }
    }

    /// Memory-only storage without an audit log
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), None)
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load both collections, seeding default categories on first run
    pub fn load_all(&self) -> MoneyTrackResult<()> {
        self.expenses.load()?;
        self.categories.load()?;
        seed_default_categories(&self.categories)?;
        Ok(())
    }

    pub fn save_all(&self) -> MoneyTrackResult<()> {
        self.expenses.save()?;
        self.categories.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> MoneyTrackResult<()> {
        self.log(|| AuditEntry::created(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> MoneyTrackResult<()> {
        self.log(|| AuditEntry::updated(entity_type, entity_id, entity_name, before, after))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> MoneyTrackResult<()> {
        self.log(|| AuditEntry::deleted(entity_type, entity_id, entity_name, entity))
    }

    fn log(&self, entry: impl FnOnce() -> AuditEntry) -> MoneyTrackResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_creates_directories_and_seeds() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();

        assert_eq!(storage.categories.count().unwrap(), 8);
        assert!(temp_dir.path().join("data").join("categories.json").exists());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_audit_entries_written_when_logger_present() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let category = Category::new("Pets");
        storage
            .log_create(
                EntityType::Category,
                category.id.to_string(),
                Some(category.name.clone()),
                &category,
            )
            .unwrap();

        let entries = storage.audit_logger().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_in_memory_storage_skips_audit() {
        let storage = Storage::in_memory();
        storage.load_all().unwrap();
        assert!(storage.audit_logger().is_none());
        storage
            .log_delete(EntityType::Category, "cat-1", None, &"x")
            .unwrap();
    }
}
