//! Savings goal service
//!
//! CRUD for savings goals, linking them to the budgets they reserve money
//! from, and one-off contributions and withdrawals.

use chrono::NaiveDate;

use crate::engine::SavingsProgress;
use crate::error::{PlannerError, PlannerResult};
use crate::models::ids::matches_short_id;
use crate::models::{Budget, BudgetId, Frequency, Money, Savings, SavingsId, SavingsPatch};
use crate::storage::Storage;

/// Service for savings goal management
pub struct SavingsService<'a> {
    storage: &'a Storage,
}

/// A savings goal with its computed progress
#[derive(Debug, Clone)]
pub struct SavingsSummary {
    pub savings: Savings,
    pub progress: SavingsProgress,
}

impl<'a> SavingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new savings goal
    pub fn create(
        &self,
        name: &str,
        target: Option<Money>,
        contribution: Option<(Money, Frequency)>,
        goal_date: Option<NaiveDate>,
    ) -> PlannerResult<Savings> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation(
                "Savings goal name cannot be empty".into(),
            ));
        }

        if self.storage.savings.name_exists(name, None)? {
            return Err(PlannerError::Duplicate {
                entity_type: "Savings goal",
                identifier: name.to_string(),
            });
        }

        let mut savings = Savings::new(name);
        savings.target_amount = target;
        savings.set_contribution(contribution);
        savings.goal_date = goal_date;

        savings
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.storage.savings.upsert(savings.clone())?;
        self.storage.savings.save()?;

        self.storage.log_created(&savings)?;

        tracing::info!(id = %savings.id, name = %savings.name, "created savings goal");
        Ok(savings)
    }

    pub fn get(&self, id: SavingsId) -> PlannerResult<Option<Savings>> {
        self.storage.savings.get(id)
    }

    /// Find a savings goal by name, full id, or short display id
    pub fn find(&self, identifier: &str) -> PlannerResult<Option<Savings>> {
        if let Some(savings) = self.storage.savings.get_by_name(identifier)? {
            return Ok(Some(savings));
        }

        if let Ok(id) = identifier.trim().parse::<SavingsId>() {
            return self.storage.savings.get(id);
        }

        self.storage
            .savings
            .find_by(|s| matches_short_id(&s.id, identifier))
    }

    /// Like `find`, but a missing goal is an error
    pub fn require(&self, identifier: &str) -> PlannerResult<Savings> {
        self.find(identifier)?
            .ok_or_else(|| PlannerError::savings_not_found(identifier))
    }

    pub fn list(&self) -> PlannerResult<Vec<Savings>> {
        self.storage.savings.get_all()
    }

    /// Every goal with its progress, oldest first
    pub fn list_with_progress(&self) -> PlannerResult<Vec<SavingsSummary>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|savings| SavingsSummary {
                progress: SavingsProgress::compute(&savings),
                savings,
            })
            .collect())
    }

    /// Apply a partial update
    pub fn update(&self, id: SavingsId, patch: &SavingsPatch) -> PlannerResult<Savings> {
        let mut savings = self.load(id)?;
        if patch.is_empty() {
            return Ok(savings);
        }

        if let Some(name) = &patch.name {
            let name = name.trim();
            if self.storage.savings.name_exists(name, Some(id))? {
                return Err(PlannerError::Duplicate {
                    entity_type: "Savings goal",
                    identifier: name.to_string(),
                });
            }
        }

        let before = savings.clone();
        patch.apply(&mut savings);

        savings
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.save_update(&before, &savings)?;
        tracing::info!(id = %savings.id, "updated savings goal");
        Ok(savings)
    }

    pub fn delete(&self, id: SavingsId) -> PlannerResult<Savings> {
        let savings = self
            .storage
            .savings
            .delete(id)?
            .ok_or_else(|| PlannerError::savings_not_found(id.to_string()))?;
        self.storage.savings.save()?;

        self.storage.log_deleted(&savings)?;

        tracing::info!(id = %savings.id, "deleted savings goal");
        Ok(savings)
    }

    /// Reserve this goal's recurring contribution from a budget.
    ///
    /// Returns `false` if the goal was already linked to it.
    pub fn link_budget(&self, savings_id: SavingsId, budget_id: BudgetId) -> PlannerResult<bool> {
        let mut savings = self.load(savings_id)?;
        if self.storage.budgets.get(budget_id)?.is_none() {
            return Err(PlannerError::budget_not_found(budget_id.to_string()));
        }

        let before = savings.clone();
        if !savings.link_budget(budget_id) {
            return Ok(false);
        }

        self.save_update(&before, &savings)?;
        tracing::debug!(savings = %savings_id, budget = %budget_id, "linked budget");
        Ok(true)
    }

    pub fn unlink_budget(&self, savings_id: SavingsId, budget_id: BudgetId) -> PlannerResult<bool> {
        let mut savings = self.load(savings_id)?;

        let before = savings.clone();
        if !savings.unlink_budget(budget_id) {
            return Ok(false);
        }

        self.save_update(&before, &savings)?;
        tracing::debug!(savings = %savings_id, budget = %budget_id, "unlinked budget");
        Ok(true)
    }

    /// Budgets this goal is linked to that still exist
    pub fn linked_budgets(&self, savings: &Savings) -> PlannerResult<Vec<Budget>> {
        let mut budgets = Vec::new();
        for &id in &savings.linked_budget_ids {
            if let Some(budget) = self.storage.budgets.get(id)? {
                budgets.push(budget);
            }
        }
        Ok(budgets)
    }

    /// Add a one-off amount to the goal
    pub fn contribute(&self, id: SavingsId, amount: Money) -> PlannerResult<Savings> {
        if !amount.is_positive() {
            return Err(PlannerError::Validation(
                "Contribution must be greater than zero".into(),
            ));
        }

        let mut savings = self.load(id)?;
        let before = savings.clone();
        savings.current_amount += amount;

        self.save_update(&before, &savings)?;
        tracing::info!(id = %savings.id, %amount, "contributed to savings goal");
        Ok(savings)
    }

    /// Take a one-off amount out of the goal
    pub fn withdraw(&self, id: SavingsId, amount: Money) -> PlannerResult<Savings> {
        if !amount.is_positive() {
            return Err(PlannerError::Validation(
                "Withdrawal must be greater than zero".into(),
            ));
        }

        let mut savings = self.load(id)?;
        if amount > savings.current_amount {
            return Err(PlannerError::InsufficientSavings {
                goal: savings.name.clone(),
                needed: amount.to_string(),
                available: savings.current_amount.to_string(),
            });
        }

        let before = savings.clone();
        savings.current_amount -= amount;

        self.save_update(&before, &savings)?;
        tracing::info!(id = %savings.id, %amount, "withdrew from savings goal");
        Ok(savings)
    }

    pub fn progress(&self, savings: &Savings) -> SavingsProgress {
        SavingsProgress::compute(savings)
    }

    fn load(&self, id: SavingsId) -> PlannerResult<Savings> {
        self.storage
            .savings
            .get(id)?
            .ok_or_else(|| PlannerError::savings_not_found(id.to_string()))
    }

    fn save_update(&self, before: &Savings, after: &Savings) -> PlannerResult<()> {
        self.storage.savings.upsert(after.clone())?;
        self.storage.savings.save()?;

        self.storage.log_updated(before, after)
    }
}
