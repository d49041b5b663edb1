//! Records that can appear in the audit log

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Budget, Expense, Savings};
use crate::storage::Record;

/// Which collection an audited record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Budget,
    Savings,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Expense => "Expense",
            Self::Budget => "Budget",
            Self::Savings => "Savings goal",
        })
    }
}

/// A stored record whose changes are written to the audit log
pub trait AuditedRecord: Record {
    const KIND: RecordKind;

    /// Name shown next to the id in the log
    fn label(&self) -> &str;
}

impl AuditedRecord for Expense {
    const KIND: RecordKind = RecordKind::Expense;

    fn label(&self) -> &str {
        &self.title
    }
}

impl AuditedRecord for Budget {
    const KIND: RecordKind = RecordKind::Budget;

    fn label(&self) -> &str {
        &self.name
    }
}

impl AuditedRecord for Savings {
    const KIND: RecordKind = RecordKind::Savings;

    fn label(&self) -> &str {
        &self.name
    }
}
