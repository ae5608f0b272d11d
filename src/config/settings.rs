//! User preferences for MoneyTrack
//!
//! Stores the display theme and the currency used to format every amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::paths::MoneyTrackPaths;
use crate::error::MoneyTrackError;
use crate::models::CurrencyCode;
use crate::storage::{read_json, write_json_atomic};

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = MoneyTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(MoneyTrackError::Validation(format!(
                "Unknown theme '{}'. Use 'light' or 'dark'",
                other
            ))),
        }
    }
}

/// User settings for MoneyTrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub theme_mode: ThemeMode,

    /// ISO 4217 code used when formatting amounts
    #[serde(default)]
    pub currency: CurrencyCode,

    /// Date format for listings (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many expenses `expense recent` shows by default
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%b %-d, %Y".to_string()
}

fn default_recent_limit() -> usize {
    crate::services::DEFAULT_RECENT_LIMIT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            theme_mode: ThemeMode::default(),
            currency: CurrencyCode::default(),
            date_format: default_date_format(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &MoneyTrackPaths) -> Result<Self, MoneyTrackError> {
        // A missing file yields defaults; the caller decides when to persist
        read_json(paths.settings_file())
            .map_err(|e| MoneyTrackError::Config(format!("Failed to load settings: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneyTrackPaths) -> Result<(), MoneyTrackError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)?;

        tracing::debug!(theme = %self.theme_mode, currency = %self.currency, "settings saved");
        Ok(())
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
    }

    /// Change the display currency
    ///
    /// Only the shape of the code is checked (three ASCII letters); whether the
    /// code names a real currency is left to the formatter.
    pub fn set_currency(&mut self, code: &str) -> Result<(), MoneyTrackError> {
        self.currency = CurrencyCode::parse(code).map_err(|e| {
            MoneyTrackError::Validation(e.to_string())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme_mode, ThemeMode::Light);
        assert_eq!(settings.currency.as_str(), "USD");
        assert_eq!(settings.recent_limit, 5);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set_theme(ThemeMode::Dark);
        settings.set_currency("eur").unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.theme_mode, ThemeMode::Dark);
        assert_eq!(loaded.currency.as_str(), "EUR");
    }

    #[test]
    fn test_load_missing_and_corrupt_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency.as_str(), "USD");
        assert!(!paths.settings_file().exists());

        std::fs::write(paths.settings_file(), "{ not json").unwrap();
        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, MoneyTrackError::Config(_)));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme_mode": "dark"}"#).unwrap();
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.currency.as_str(), "USD");
        assert_eq!(settings.date_format, "%b %-d, %Y");
    }

    #[test]
    fn test_invalid_currency_rejected() {
        let mut settings = Settings::default();
        assert!(settings.set_currency("dollars").is_err());
        assert_eq!(settings.currency.as_str(), "USD");
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("Dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}
