//! Path management for MoneyTrack
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYTRACK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/moneytrack` on Linux,
//!    `~/Library/Application Support/moneytrack` on macOS,
//!    `%APPDATA%\moneytrack\config` on Windows)
//! 3. `$HOME/.config/moneytrack` when no platform directory can be determined

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::MoneyTrackError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "MONEYTRACK_DATA_DIR";

/// Manages all paths used by MoneyTrack
#[derive(Debug, Clone)]
pub struct MoneyTrackPaths {
    base_dir: PathBuf,
}

impl MoneyTrackPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither a platform directory nor `HOME` is available.
    pub fn new() -> Result<Self, MoneyTrackError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON document per store key
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Path to the preferences file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the append-only audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), MoneyTrackError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MoneyTrackError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MoneyTrackError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if MoneyTrack has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, MoneyTrackError> {
    if let Some(dirs) = ProjectDirs::from("", "", "moneytrack") {
        return Ok(dirs.config_dir().to_path_buf());
    }

    let home = std::env::var("HOME").map_err(|_| {
        MoneyTrackError::Config("Could not determine a home directory for MoneyTrack data".into())
    })?;
    Ok(PathBuf::from(home).join(".config").join("moneytrack"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
