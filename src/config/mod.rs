//! Configuration module for MoneyTrack
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User preference persistence (theme, currency)

pub mod paths;
pub mod settings;

pub use paths::MoneyTrackPaths;
pub use settings::{Settings, ThemeMode};
