//! Budget repository for JSON storage

use chrono::{DateTime, Utc};

use crate::error::PlannerError;
use crate::models::{Budget, BudgetId};

use super::repository::{JsonRepository, Record};

impl Record for Budget {
    type Id = BudgetId;
    const COLLECTION: &'static str = "budgets";

    fn id(&self) -> BudgetId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub type BudgetRepository = JsonRepository<Budget>;

impl JsonRepository<Budget> {
    /// Budget by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Budget>, PlannerError> {
        let name = name.trim().to_lowercase();
        self.find_by(|b| b.name.to_lowercase() == name)
    }

    /// Whether another budget already uses `name`
    pub fn name_exists(&self, name: &str, exclude: Option<BudgetId>) -> Result<bool, PlannerError> {
        Ok(self
            .get_by_name(name)?
            .is_some_and(|b| Some(b.id) != exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, ExpenseId, Money};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_links_survive_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");

        let repo = BudgetRepository::new(path.clone());
        let mut budget = Budget::new("Groceries", Money::new(dec!(450)), BudgetPeriod::Monthly);
        budget.link_expense(ExpenseId::new());
        budget.link_expense(ExpenseId::new());
        repo.upsert(budget.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(path);
        reloaded.load().unwrap();
        let loaded = reloaded.get(budget.id).unwrap().unwrap();
        assert_eq!(loaded.linked_expense_ids, budget.linked_expense_ids);
    }

    #[test]
    fn test_name_exists() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        let budget = Budget::new("Fun", Money::new(dec!(60)), BudgetPeriod::Weekly);
        repo.upsert(budget.clone()).unwrap();

        assert!(repo.name_exists("fun", None).unwrap());
        assert!(!repo.name_exists("fun", Some(budget.id)).unwrap());
        assert!(!repo.name_exists("Travel", None).unwrap());
    }
}
