//! Append-only audit log
//!
//! Every create, update and delete of an expense or category, and every
//! settings change, is appended to `audit.log` as one JSON object per line.
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::created(EntityType::Category, id, Some(name), &category))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::summarize_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
