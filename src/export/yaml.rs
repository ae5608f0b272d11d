//! Full YAML export
//!
//! Same content as the JSON export, with a comment header.

use std::io::Write;

use crate::config::settings::Settings;
use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
) -> MoneyTrackResult<()> {
    let export = FullExport::from_storage(storage, settings)?;
    let export_err = |e: std::io::Error| MoneyTrackError::Export(e.to_string());

    writeln!(writer, "# MoneyTrack export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| MoneyTrackError::Export(e.to_string()))
}
