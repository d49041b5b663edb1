//! Storage layer for the budget planner
//!
//! JSON file storage with atomic writes. The `Storage` coordinator owns one
//! repository per record kind and the audit logger.

pub mod budgets;
pub mod expenses;
pub mod file_io;
pub mod repository;
pub mod savings;

pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use repository::{JsonRepository, Record};
pub use savings::SavingsRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, AuditedRecord};
use crate::config::paths::PlannerPaths;
use crate::error::PlannerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub expenses: ExpenseRepository,
    pub budgets: BudgetRepository,
    pub savings: SavingsRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: PlannerPaths) -> Result<Self, PlannerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            savings: SavingsRepository::new(paths.savings_file()),
            audit: AuditLogger::new(paths.audit_log()),
        })
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PlannerError> {
        self.expenses.load()?;
        self.budgets.load()?;
        self.savings.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PlannerError> {
        self.expenses.save()?;
        self.budgets.save()?;
        self.savings.save()?;
        Ok(())
    }

    /// Record a newly created record in the audit log
    pub fn log_created<R: AuditedRecord>(&self, record: &R) -> Result<(), PlannerError> {
        self.audit.log(&AuditEntry::created(record))
    }

    pub fn log_updated<R: AuditedRecord>(&self, before: &R, after: &R) -> Result<(), PlannerError> {
        self.audit.log(&AuditEntry::updated(before, after))
    }

    pub fn log_deleted<R: AuditedRecord>(&self, record: &R) -> Result<(), PlannerError> {
        self.audit.log(&AuditEntry::deleted(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetPeriod, Money};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_save_all_and_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(paths.clone()).unwrap();
        let budget = Budget::new("Food", Money::new(dec!(300)), BudgetPeriod::Monthly);
        storage.budgets.upsert(budget.clone()).unwrap();
        storage.save_all().unwrap();
        assert!(paths.expenses_file().exists());

        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.budgets.get(budget.id).unwrap(), Some(budget));
        assert!(reopened.expenses.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_log_helpers_append_to_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let budget = Budget::new("Food", Money::new(dec!(300)), BudgetPeriod::Monthly);
        storage.log_created(&budget).unwrap();
        storage.log_deleted(&budget).unwrap();

        let entries = storage.audit().read_recent(10).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.label == "Food"));
    }
}
