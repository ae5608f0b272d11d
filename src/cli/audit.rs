//! Audit log CLI command

use crate::error::MoneyTrackResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> MoneyTrackResult<()> {
    let Some(logger) = storage.audit_logger() else {
        println!("Audit logging is not enabled for this storage.");
        return Ok(());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
