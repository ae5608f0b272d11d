//! Data export
//!
//! - JSON and YAML: full snapshot of settings, categories and expenses
//! - CSV: one row per expense, for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
