//! Budget model
//!
//! A budget is a spending cap for one accounting period. It owns no
//! expenses: `linked_expense_ids` is a set of weak references, and an id
//! whose expense has since been deleted simply matches nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::category::ExpenseCategory;
use super::frequency::BudgetPeriod;
use super::ids::{BudgetId, ExpenseId};
use super::money::Money;

/// Default alert threshold, as a percent of the budget amount
pub const DEFAULT_ALERT_THRESHOLD: u8 = 80;

fn default_alert_threshold() -> u8 {
    DEFAULT_ALERT_THRESHOLD
}

/// A budget for one category (or everything) over a recurring period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,

    pub name: String,

    /// The cap for one period
    pub amount: Money,

    /// Optional category filter (used for suggestions and display)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,

    #[serde(default)]
    pub period: BudgetPeriod,

    /// Percent of the amount at which the budget is flagged as near its limit
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u8,

    #[serde(default)]
    pub linked_expense_ids: BTreeSet<ExpenseId>,

    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget with the default alert threshold and no links
    pub fn new(name: impl Into<String>, amount: Money, period: BudgetPeriod) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            amount,
            category: None,
            period,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            linked_expense_ids: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style category filter
    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Link an expense; returns false if it was already linked
    pub fn link_expense(&mut self, expense_id: ExpenseId) -> bool {
        self.linked_expense_ids.insert(expense_id)
    }

    /// Unlink an expense; returns false if it was not linked
    pub fn unlink_expense(&mut self, expense_id: ExpenseId) -> bool {
        self.linked_expense_ids.remove(&expense_id)
    }

    pub fn is_linked(&self, expense_id: ExpenseId) -> bool {
        self.linked_expense_ids.contains(&expense_id)
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }

        if self.alert_threshold == 0 || self.alert_threshold > 100 {
            return Err(BudgetValidationError::InvalidAlertThreshold(
                self.alert_threshold,
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.amount, self.period)
    }
}

/// Partial update for a budget; only `Some` fields are applied
#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub amount: Option<Money>,
    /// `Some(None)` clears the category filter
    pub category: Option<Option<ExpenseCategory>>,
    pub period: Option<BudgetPeriod>,
    pub alert_threshold: Option<u8>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.period.is_none()
            && self.alert_threshold.is_none()
    }

    pub fn apply(&self, budget: &mut Budget) {
        if let Some(name) = &self.name {
            budget.name = name.trim().to_string();
        }
        if let Some(amount) = self.amount {
            budget.amount = amount;
        }
        if let Some(category) = self.category {
            budget.category = category;
        }
        if let Some(period) = self.period {
            budget.period = period;
        }
        if let Some(threshold) = self.alert_threshold {
            budget.alert_threshold = threshold;
        }
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NonPositiveAmount,
    InvalidAlertThreshold(u8),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Budget amount must be greater than zero"),
            Self::InvalidAlertThreshold(t) => {
                write!(f, "Alert threshold must be between 1 and 100, got {}", t)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_budget_defaults() {
        let budget = Budget::new("Groceries", Money::new(dec!(400)), BudgetPeriod::Monthly);
        assert_eq!(budget.alert_threshold, 80);
        assert!(budget.linked_expense_ids.is_empty());
        assert_eq!(budget.category, None);
    }

    #[test]
    fn test_link_is_a_set() {
        let mut budget = Budget::new("Fun", Money::new(dec!(100)), BudgetPeriod::Weekly);
        let expense_id = ExpenseId::new();

        assert!(budget.link_expense(expense_id));
        assert!(!budget.link_expense(expense_id));
        assert_eq!(budget.linked_expense_ids.len(), 1);
        assert!(budget.is_linked(expense_id));

        assert!(budget.unlink_expense(expense_id));
        assert!(!budget.unlink_expense(expense_id));
        assert!(!budget.is_linked(expense_id));
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new("Food", Money::new(dec!(300)), BudgetPeriod::Monthly);
        assert!(budget.validate().is_ok());

        budget.alert_threshold = 0;
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::InvalidAlertThreshold(0))
        );

        budget.alert_threshold = 101;
        assert!(budget.validate().is_err());

        budget.alert_threshold = 80;
        budget.amount = Money::zero();
        assert_eq!(budget.validate(), Err(BudgetValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_patch_can_clear_category() {
        let mut budget = Budget::new("Food", Money::new(dec!(300)), BudgetPeriod::Monthly)
            .with_category(ExpenseCategory::Food);

        BudgetPatch {
            period: Some(BudgetPeriod::Weekly),
            ..Default::default()
        }
        .apply(&mut budget);
        assert_eq!(budget.period, BudgetPeriod::Weekly);
        assert_eq!(budget.category, Some(ExpenseCategory::Food));

        BudgetPatch {
            category: Some(None),
            ..Default::default()
        }
        .apply(&mut budget);
        assert_eq!(budget.category, None);
    }

    #[test]
    fn test_missing_threshold_defaults_on_load() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Legacy",
            "amount": "250",
            "period": "weekly",
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.alert_threshold, 80);
        assert_eq!(budget.period, BudgetPeriod::Weekly);
        assert!(budget.linked_expense_ids.is_empty());
    }
}
