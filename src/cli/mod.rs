//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod expense;
pub mod export;
pub mod report;
pub mod settings;

pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};

use chrono::NaiveDate;

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::Money;

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_date_arg(value: &str) -> MoneyTrackResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        MoneyTrackError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", value))
    })
}

/// Parse an amount argument such as `12.50`
pub(crate) fn parse_amount_arg(value: &str) -> MoneyTrackResult<Money> {
    Money::parse(value)
        .map_err(|e| MoneyTrackError::Validation(format!("Invalid amount: {}", e)))
}
