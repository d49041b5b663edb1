//! Budget service
//!
//! CRUD for budgets, linking expenses into them, and the computed status
//! (spent, allocated, available) from the period engine.

use crate::engine::{suggest_budget, BudgetStatus};
use crate::error::{PlannerError, PlannerResult};
use crate::models::ids::matches_short_id;
use crate::models::{
    Budget, BudgetId, BudgetPatch, BudgetPeriod, Expense, ExpenseCategory, ExpenseId, Money,
    Savings,
};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// A budget with its computed status
#[derive(Debug, Clone)]
pub struct BudgetSummary {
    pub budget: Budget,
    pub status: BudgetStatus,
}

/// A budget's linked expenses, split into those that still exist and ids
/// whose expense has been deleted
#[derive(Debug, Clone, Default)]
pub struct LinkedExpenses {
    pub found: Vec<Expense>,
    pub dangling: Vec<ExpenseId>,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new budget
    pub fn create(
        &self,
        name: &str,
        amount: Money,
        period: BudgetPeriod,
        category: Option<ExpenseCategory>,
        alert_threshold: u8,
    ) -> PlannerResult<Budget> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation(
                "Budget name cannot be empty".into(),
            ));
        }

        if self.storage.budgets.name_exists(name, None)? {
            return Err(PlannerError::Duplicate {
                entity_type: "Budget",
                identifier: name.to_string(),
            });
        }

        let mut budget = Budget::new(name, amount, period);
        budget.category = category;
        budget.alert_threshold = alert_threshold;

        budget
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_created(&budget)?;

        tracing::info!(id = %budget.id, name = %budget.name, "created budget");
        Ok(budget)
    }

    pub fn get(&self, id: BudgetId) -> PlannerResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by name, full id, or short display id
    pub fn find(&self, identifier: &str) -> PlannerResult<Option<Budget>> {
        if let Some(budget) = self.storage.budgets.get_by_name(identifier)? {
            return Ok(Some(budget));
        }

        if let Ok(id) = identifier.trim().parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        self.storage
            .budgets
            .find_by(|b| matches_short_id(&b.id, identifier))
    }

    /// Like `find`, but a missing budget is an error
    pub fn require(&self, identifier: &str) -> PlannerResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| PlannerError::budget_not_found(identifier))
    }

    pub fn list(&self) -> PlannerResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Apply a partial update
    pub fn update(&self, id: BudgetId, patch: &BudgetPatch) -> PlannerResult<Budget> {
        let mut budget = self.load(id)?;
        if patch.is_empty() {
            return Ok(budget);
        }

        if let Some(name) = &patch.name {
            let name = name.trim();
            if self.storage.budgets.name_exists(name, Some(id))? {
                return Err(PlannerError::Duplicate {
                    entity_type: "Budget",
                    identifier: name.to_string(),
                });
            }
        }

        let before = budget.clone();
        patch.apply(&mut budget);

        budget
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.save_update(&before, &budget)?;
        tracing::info!(id = %budget.id, "updated budget");
        Ok(budget)
    }

    /// Delete a budget. Savings goals that reserve from it keep the link,
    /// which is ignored from then on.
    pub fn delete(&self, id: BudgetId) -> PlannerResult<Budget> {
        let budget = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| PlannerError::budget_not_found(id.to_string()))?;
        self.storage.budgets.save()?;

        self.storage.log_deleted(&budget)?;

        tracing::info!(id = %budget.id, "deleted budget");
        Ok(budget)
    }

    /// Count an existing expense against a budget.
    ///
    /// Returns `false` if the expense was already linked.
    pub fn link_expense(&self, budget_id: BudgetId, expense_id: ExpenseId) -> PlannerResult<bool> {
        let mut budget = self.load(budget_id)?;
        if self.storage.expenses.get(expense_id)?.is_none() {
            return Err(PlannerError::expense_not_found(expense_id.to_string()));
        }

        let before = budget.clone();
        if !budget.link_expense(expense_id) {
            return Ok(false);
        }

        self.save_update(&before, &budget)?;
        tracing::debug!(budget = %budget_id, expense = %expense_id, "linked expense");
        Ok(true)
    }

    /// Stop counting an expense against a budget.
    ///
    /// Works for dangling ids too. Returns `false` if it wasn't linked.
    pub fn unlink_expense(
        &self,
        budget_id: BudgetId,
        expense_id: ExpenseId,
    ) -> PlannerResult<bool> {
        let mut budget = self.load(budget_id)?;

        let before = budget.clone();
        if !budget.unlink_expense(expense_id) {
            return Ok(false);
        }

        self.save_update(&before, &budget)?;
        tracing::debug!(budget = %budget_id, expense = %expense_id, "unlinked expense");
        Ok(true)
    }

    /// Resolve a budget's linked ids against the stored expenses
    pub fn linked_expenses(&self, budget: &Budget) -> PlannerResult<LinkedExpenses> {
        let mut linked = LinkedExpenses::default();
        for &id in &budget.linked_expense_ids {
            match self.storage.expenses.get(id)? {
                Some(expense) => linked.found.push(expense),
                None => linked.dangling.push(id),
            }
        }
        Ok(linked)
    }

    /// Savings goals that reserve their contribution from this budget
    pub fn linked_savings(&self, budget_id: BudgetId) -> PlannerResult<Vec<Savings>> {
        self.storage.savings.get_linked_to(budget_id)
    }

    /// Spent, allocated and available for one budget
    pub fn status(&self, budget: &Budget) -> PlannerResult<BudgetStatus> {
        let expenses = self.storage.expenses.get_all()?;
        let savings = self.storage.savings.get_all()?;
        Ok(BudgetStatus::compute(budget, &expenses, &savings))
    }

    /// Status for every budget, oldest first
    pub fn status_all(&self) -> PlannerResult<Vec<BudgetSummary>> {
        let expenses = self.storage.expenses.get_all()?;
        let savings = self.storage.savings.get_all()?;

        Ok(self
            .list()?
            .into_iter()
            .map(|budget| {
                let status = BudgetStatus::compute(&budget, &expenses, &savings);
                BudgetSummary { budget, status }
            })
            .collect())
    }

    /// Suggested amount for a new budget from all recorded expenses, unrounded
    pub fn suggest(
        &self,
        category: Option<ExpenseCategory>,
        period: BudgetPeriod,
    ) -> PlannerResult<Money> {
        let expenses = self.storage.expenses.get_all()?;
        let suggestion = suggest_budget(&expenses, category, period);
        tracing::debug!(?category, %period, %suggestion, "computed budget suggestion");
        Ok(suggestion)
    }

    fn load(&self, id: BudgetId) -> PlannerResult<Budget> {
        self.storage
            .budgets
            .get(id)?
            .ok_or_else(|| PlannerError::budget_not_found(id.to_string()))
    }

    fn save_update(&self, before: &Budget, after: &Budget) -> PlannerResult<()> {
        self.storage.budgets.upsert(after.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_updated(before, after)
    }
}
