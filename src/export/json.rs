//! Full JSON export
//!
//! A versioned snapshot of the settings and both collections.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{Category, Expense, Money};
use crate::storage::Storage;

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub settings: Settings,
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub category_count: usize,
    pub total_spent: Money,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
    /// Expenses pointing at a category that is not in the export
    pub orphaned_expense_count: usize,
}

impl FullExport {
    pub fn from_storage(storage: &Storage, settings: &Settings) -> MoneyTrackResult<Self> {
        let categories = storage.categories.get_all()?;
        let expenses = storage.expenses.get_all()?;

        let known: HashSet<_> = categories.iter().map(|c| c.id).collect();
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            category_count: categories.len(),
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
            orphaned_expense_count: expenses
                .iter()
                .filter(|e| !known.contains(&e.category_id))
                .count(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            settings: settings.clone(),
            categories,
            expenses,
            metadata,
        })
    }

    /// Check the schema version and category name uniqueness
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut names = HashSet::new();
        for category in &self.categories {
            if !names.insert(category.name.trim().to_lowercase()) {
                return Err(format!("Duplicate category name '{}'", category.name));
            }
        }

        Ok(())
    }
}

pub fn export_full_json<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
    pretty: bool,
) -> MoneyTrackResult<()> {
    let export = FullExport::from_storage(storage, settings)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| MoneyTrackError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use chrono::NaiveDate;

    fn storage_with_data() -> Storage {
        let storage = Storage::in_memory();
        storage.load_all().unwrap();
        let food = storage.categories.get_by_name("Food & Dining").unwrap().unwrap();

        let specs = [(1200, 3, food.id), (800, 9, food.id), (500, 5, CategoryId::new())];
        for (cents, day, category) in specs {
            storage
                .expenses
                .upsert(Expense::new(
                    Money::from_cents(cents),
                    "Test",
                    NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                    category,
                ))
                .unwrap();
        }
        storage
    }

    #[test]
    fn test_full_export_metadata() {
        let storage = storage_with_data();
        let export = FullExport::from_storage(&storage, &Settings::default()).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 3);
        assert_eq!(export.metadata.category_count, 8);
        assert_eq!(export.metadata.total_spent, Money::from_cents(2500));
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2024-03-03"));
        assert_eq!(export.metadata.latest_expense.as_deref(), Some("2024-03-09"));
        assert_eq!(export.metadata.orphaned_expense_count, 1);
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_output_parses_back() {
        let storage = storage_with_data();
        let mut buffer = Vec::new();
        export_full_json(&storage, &Settings::default(), &mut buffer, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.expenses.len(), 3);
        assert_eq!(parsed.settings.currency.as_str(), "USD");
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let storage = Storage::in_memory();
        let mut export = FullExport::from_storage(&storage, &Settings::default()).unwrap();
        export.categories = vec![Category::new("Pets"), Category::new("pets")];
        assert!(export.validate().is_err());

        export.categories.clear();
        export.schema_version = "0.1".into();
        assert!(export.validate().is_err());
    }
}
