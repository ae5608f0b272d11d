//! Flat key-value store holding the serialized collections
//!
//! Each key maps to one JSON text document. [`FileStore`] keeps a
//! `<key>.json` file per key; [`MemoryStore`] keeps everything in a map.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{MoneyTrackError, MoneyTrackResult};

use super::file_io::{read_text, write_text_atomic};

/// Key under which the expense array is stored
pub const EXPENSES_KEY: &str = "expenses";

/// Key under which the category array is stored
pub const CATEGORIES_KEY: &str = "categories";

pub trait KeyValueStore: Send + Sync {
    /// The stored text for `key`, `None` if the key has never been written
    fn get(&self, key: &str) -> MoneyTrackResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> MoneyTrackResult<()>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> MoneyTrackResult<Option<String>> {
        read_text(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> MoneyTrackResult<()> {
        write_text_atomic(self.path_for(key), value)
    }
}

/// In-process store, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> MoneyTrackResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> MoneyTrackResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
