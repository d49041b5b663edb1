//! One line of the audit log

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::summarize_changes;
use super::record::{AuditedRecord, RecordKind};

/// What happened to the record, with the snapshots needed to replay it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Change {
    Created {
        record: Value,
    },
    Updated {
        before: Value,
        after: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    Deleted {
        record: Value,
    },
}

impl Change {
    fn verb(&self) -> &'static str {
        match self {
            Self::Created { .. } => "CREATE",
            Self::Updated { .. } => "UPDATE",
            Self::Deleted { .. } => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub kind: RecordKind,
    pub id: String,
    pub label: String,
    pub change: Change,
}

impl AuditEntry {
    pub fn created<R: AuditedRecord>(record: &R) -> Self {
        Self::about(
            record,
            Change::Created {
                record: snapshot(record),
            },
        )
    }

    /// Update entry; the summary lists the top-level fields that differ
    pub fn updated<R: AuditedRecord>(before: &R, after: &R) -> Self {
        Self::about(
            after,
            Change::Updated {
                before: snapshot(before),
                after: snapshot(after),
                summary: summarize_changes(before, after),
            },
        )
    }

    pub fn deleted<R: AuditedRecord>(record: &R) -> Self {
        Self::about(
            record,
            Change::Deleted {
                record: snapshot(record),
            },
        )
    }

    fn about<R: AuditedRecord>(record: &R, change: Change) -> Self {
        Self {
            at: Utc::now(),
            kind: R::KIND,
            id: record.id().to_string(),
            label: record.label().to_string(),
            change,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match &self.change {
            Change::Updated { summary, .. } => summary.as_deref(),
            _ => None,
        }
    }
}

fn snapshot<R: Serialize>(record: &R) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {} ({})",
            self.at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.change.verb(),
            self.kind,
            self.id,
            self.label
        )?;
        if let Some(summary) = self.summary() {
            write!(f, "\n  Changes: {}", summary)?;
        }
        Ok(())
    }
}
