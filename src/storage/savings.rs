//! Savings goal repository for JSON storage

use chrono::{DateTime, Utc};

use crate::error::PlannerError;
use crate::models::{BudgetId, Savings, SavingsId};

use super::repository::{JsonRepository, Record};

impl Record for Savings {
    type Id = SavingsId;
    const COLLECTION: &'static str = "savings";

    fn id(&self) -> SavingsId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub type SavingsRepository = JsonRepository<Savings>;

impl JsonRepository<Savings> {
    /// Savings goal by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Savings>, PlannerError> {
        let name = name.trim().to_lowercase();
        self.find_by(|s| s.name.to_lowercase() == name)
    }

    pub fn name_exists(&self, name: &str, exclude: Option<SavingsId>) -> Result<bool, PlannerError> {
        Ok(self
            .get_by_name(name)?
            .is_some_and(|s| Some(s.id) != exclude))
    }

    /// Goals linked to a budget
    pub fn get_linked_to(&self, budget_id: BudgetId) -> Result<Vec<Savings>, PlannerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|s| s.is_linked_to(budget_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_get_linked_to() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SavingsRepository::new(temp_dir.path().join("savings.json"));
        let budget_id = BudgetId::new();

        let mut linked = Savings::new("Trip").with_contribution(Money::new(dec!(100)), Frequency::Monthly);
        linked.link_budget(budget_id);
        let unlinked = Savings::new("Car");
        repo.upsert(linked.clone()).unwrap();
        repo.upsert(unlinked).unwrap();

        let found = repo.get_linked_to(budget_id).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, linked.id);
    }

    #[test]
    fn test_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("savings.json");
        let repo = SavingsRepository::new(path.clone());
        let goal = Savings::new("Emergency").with_target(Money::new(dec!(5000)));
        repo.upsert(goal.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = SavingsRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_by_name("emergency").unwrap(), Some(goal));
    }
}
