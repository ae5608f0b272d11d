//! MoneyTrack - Terminal-based personal expense tracker
//!
//! This library provides the core of the MoneyTrack expense tracker: the
//! expense and category model, the date-range resolver, the aggregations
//! behind the category breakdown and spending trends, and the amount
//! formatter. A thin command-line front end lives in `main.rs`.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `clock`: Injectable source of the current time
//! - `models`: Core data models (expenses, categories, money, date ranges)
//! - `storage`: Key-value storage layer
//! - `services`: Validation and audited mutations
//! - `reports`: Category breakdown, trends and the monthly summary
//! - `display`: Terminal tables
//! - `export`: JSON, YAML and CSV export
//! - `audit`: Audit logging system
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use moneytrack::models::TimeRange;
//! use moneytrack::reports::CategoryBreakdownReport;
//! use moneytrack::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! storage.load_all()?;
//! let report = CategoryBreakdownReport::generate(
//!     &storage.expenses.get_all()?,
//!     &storage.categories.get_all()?,
//!     TimeRange::Month,
//!     chrono::Local::now().naive_local(),
//! );
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{MoneyTrackError, MoneyTrackResult};
