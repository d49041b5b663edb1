//! Expense service
//!
//! CRUD for expense records. Expenses are referenced weakly by budgets, so
//! deleting one leaves any budget links in place; the engine skips them.

use chrono::NaiveDate;

use crate::error::{PlannerError, PlannerResult};
use crate::models::ids::matches_short_id;
use crate::models::{Expense, ExpenseCategory, ExpenseId, ExpensePatch, Money, Recurrence};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    pub fn create(
        &self,
        title: &str,
        amount: Money,
        category: ExpenseCategory,
        date: NaiveDate,
        recurrence: Recurrence,
    ) -> PlannerResult<Expense> {
        let mut expense = Expense::new(title.trim(), amount, category, date);
        expense.set_recurrence(recurrence);

        expense
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_created(&expense)?;

        tracing::info!(id = %expense.id, title = %expense.title, "created expense");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> PlannerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by title, full id, or short display id
    pub fn find(&self, identifier: &str) -> PlannerResult<Option<Expense>> {
        if let Some(expense) = self.storage.expenses.get_by_title(identifier)? {
            return Ok(Some(expense));
        }

        if let Ok(id) = identifier.trim().parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        self.storage
            .expenses
            .find_by(|e| matches_short_id(&e.id, identifier))
    }

    /// Like `find`, but a missing expense is an error
    pub fn require(&self, identifier: &str) -> PlannerResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| PlannerError::expense_not_found(identifier))
    }

    /// All expenses, oldest first, optionally limited to one category
    pub fn list(&self, category: Option<ExpenseCategory>) -> PlannerResult<Vec<Expense>> {
        match category {
            Some(category) => self.storage.expenses.get_by_category(category),
            None => self.storage.expenses.get_all(),
        }
    }

    /// Apply a partial update
    pub fn update(&self, id: ExpenseId, patch: &ExpensePatch) -> PlannerResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| PlannerError::expense_not_found(id.to_string()))?;

        if patch.is_empty() {
            return Ok(expense);
        }

        let before = expense.clone();
        patch.apply(&mut expense);

        expense
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_updated(&before, &expense)?;

        tracing::info!(id = %expense.id, "updated expense");
        Ok(expense)
    }

    /// Delete an expense; budget links to it are left dangling
    pub fn delete(&self, id: ExpenseId) -> PlannerResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| PlannerError::expense_not_found(id.to_string()))?;
        self.storage.expenses.save()?;

        self.storage.log_deleted(&expense)?;

        tracing::info!(id = %expense.id, "deleted expense");
        Ok(expense)
    }
}
