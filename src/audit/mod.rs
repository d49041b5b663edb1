//! Audit logging for record changes
//!
//! Every create, update and delete made through the services is appended to
//! a line-delimited JSON log with before/after snapshots.

mod diff;
mod entry;
mod logger;
mod record;

pub use diff::summarize_changes;
pub use entry::{AuditEntry, Change};
pub use logger::AuditLogger;
pub use record::{AuditedRecord, RecordKind};
