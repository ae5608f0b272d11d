//! Settings CLI commands

use clap::Subcommand;

use crate::audit::EntityType;
use crate::config::paths::MoneyTrackPaths;
use crate::config::settings::{Settings, ThemeMode};
use crate::error::MoneyTrackResult;
use crate::models::SUPPORTED_CURRENCIES;
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current preferences
    Show,

    /// Set the theme
    Theme {
        /// light or dark
        mode: ThemeMode,
    },

    /// Set the display currency
    Currency {
        /// ISO 4217 code, e.g. EUR
        code: String,
    },

    /// List the currencies with a known symbol
    Currencies,
}

/// Handle a settings command
///
/// Changes are saved immediately and recorded in the audit log.
pub fn handle_settings_command(
    storage: &Storage,
    paths: &MoneyTrackPaths,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> MoneyTrackResult<()> {
    match cmd {
        SettingsCommands::Show => {
            println!("Settings");
            println!("========");
            println!("  Theme:        {}", settings.theme_mode);
            println!("  Currency:     {}", settings.currency);
            println!("  Date format:  {}", settings.date_format);
            println!("  Recent limit: {}", settings.recent_limit);
        }

        SettingsCommands::Theme { mode } => {
            let before = settings.clone();
            settings.set_theme(mode);
            persist(storage, paths, &before, settings)?;
            println!("Theme set to {}", settings.theme_mode);
        }

        SettingsCommands::Currency { code } => {
            let before = settings.clone();
            settings.set_currency(&code)?;
            persist(storage, paths, &before, settings)?;
            println!("Currency set to {}", settings.currency);
        }

        SettingsCommands::Currencies => {
            for (code, symbol) in SUPPORTED_CURRENCIES {
                println!("{:<4} {}", code, symbol);
            }
        }
    }

    Ok(())
}

fn persist(
    storage: &Storage,
    paths: &MoneyTrackPaths,
    before: &Settings,
    after: &Settings,
) -> MoneyTrackResult<()> {
    after.save(paths)?;
    storage.log_update(
        EntityType::Settings,
        "settings",
        Some("Settings".to_string()),
        before,
        after,
    )
}
