//! Expense repository for JSON storage

use chrono::{DateTime, Utc};

use crate::error::PlannerError;
use crate::models::{Expense, ExpenseCategory, ExpenseId};

use super::repository::{JsonRepository, Record};

impl Record for Expense {
    type Id = ExpenseId;
    const COLLECTION: &'static str = "expenses";

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub type ExpenseRepository = JsonRepository<Expense>;

impl JsonRepository<Expense> {
    /// Expense by title (case-insensitive)
    pub fn get_by_title(&self, title: &str) -> Result<Option<Expense>, PlannerError> {
        let title = title.trim().to_lowercase();
        self.find_by(|e| e.title.to_lowercase() == title)
    }

    /// Expenses in a category, oldest first
    pub fn get_by_category(
        &self,
        category: ExpenseCategory,
    ) -> Result<Vec<Expense>, PlannerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| e.category == category)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");

        let repo = ExpenseRepository::new(path.clone());
        let coffee = Expense::new("Coffee", Money::new(dec!(3.80)), ExpenseCategory::Food, date());
        let rent = Expense::recurring(
            "Rent",
            Money::new(dec!(1200)),
            ExpenseCategory::Housing,
            date(),
            Frequency::Monthly,
        );
        repo.upsert(coffee.clone()).unwrap();
        repo.upsert(rent.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = ExpenseRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap().len(), 2);
        assert_eq!(reloaded.get(rent.id).unwrap(), Some(rent));
        assert_eq!(reloaded.get_by_title("COFFEE").unwrap(), Some(coffee));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_get_by_category_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));

        let bus = Expense::new("Bus", Money::new(dec!(2.50)), ExpenseCategory::Transport, date());
        let taxi = Expense::new("Taxi", Money::new(dec!(18)), ExpenseCategory::Transport, date());
        let meal = Expense::new("Meal", Money::new(dec!(11)), ExpenseCategory::Food, date());
        for e in [&bus, &taxi, &meal] {
            repo.upsert(e.clone()).unwrap();
        }

        assert_eq!(repo.get_by_category(ExpenseCategory::Transport).unwrap().len(), 2);

        assert_eq!(repo.delete(bus.id).unwrap(), Some(bus.clone()));
        assert_eq!(repo.delete(bus.id).unwrap(), None);
        assert_eq!(repo.get_by_category(ExpenseCategory::Transport).unwrap().len(), 1);
    }
}
