//! Savings goal model
//!
//! A savings goal may declare a recurring contribution and be linked to
//! budgets; each linked budget reserves that contribution out of its own
//! remainder.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::frequency::{lenient_frequency, Frequency};
use super::ids::{BudgetId, SavingsId};
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub id: SavingsId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Money>,

    #[serde(default)]
    pub current_amount: Money,

    #[serde(default)]
    pub linked_budget_ids: BTreeSet<BudgetId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_contribution_amount: Option<Money>,

    #[serde(
        default,
        deserialize_with = "lenient_frequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurring_contribution_frequency: Option<Frequency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

impl Savings {
    /// Create a new savings goal with nothing saved yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SavingsId::new(),
            name: name.into(),
            target_amount: None,
            current_amount: Money::zero(),
            linked_budget_ids: BTreeSet::new(),
            recurring_contribution_amount: None,
            recurring_contribution_frequency: None,
            goal_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_target(mut self, target: Money) -> Self {
        self.target_amount = Some(target);
        self
    }

    pub fn with_contribution(mut self, amount: Money, frequency: Frequency) -> Self {
        self.set_contribution(Some((amount, frequency)));
        self
    }

    /// The recurring contribution, if declared. A declared amount without a
    /// usable frequency is treated as monthly.
    pub fn recurring_contribution(&self) -> Option<(Money, Frequency)> {
        self.recurring_contribution_amount.map(|amount| {
            (
                amount,
                self.recurring_contribution_frequency
                    .unwrap_or(Frequency::Monthly),
            )
        })
    }

    /// Set or clear the recurring contribution, keeping amount and frequency in step
    pub fn set_contribution(&mut self, contribution: Option<(Money, Frequency)>) {
        match contribution {
            Some((amount, frequency)) => {
                self.recurring_contribution_amount = Some(amount);
                self.recurring_contribution_frequency = Some(frequency);
            }
            None => {
                self.recurring_contribution_amount = None;
                self.recurring_contribution_frequency = None;
            }
        }
    }

    pub fn link_budget(&mut self, budget_id: BudgetId) -> bool {
        self.linked_budget_ids.insert(budget_id)
    }

    pub fn unlink_budget(&mut self, budget_id: BudgetId) -> bool {
        self.linked_budget_ids.remove(&budget_id)
    }

    pub fn is_linked_to(&self, budget_id: BudgetId) -> bool {
        self.linked_budget_ids.contains(&budget_id)
    }

    /// Validate the savings goal
    pub fn validate(&self) -> Result<(), SavingsValidationError> {
        if self.name.trim().is_empty() {
            return Err(SavingsValidationError::EmptyName);
        }

        if self.current_amount.is_negative() {
            return Err(SavingsValidationError::NegativeCurrentAmount);
        }

        if let Some(target) = self.target_amount {
            if !target.is_positive() {
                return Err(SavingsValidationError::NonPositiveTarget);
            }
        }

        if let Some(amount) = self.recurring_contribution_amount {
            if !amount.is_positive() {
                return Err(SavingsValidationError::NonPositiveContribution);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Savings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target_amount {
            Some(target) => write!(f, "{} ({} of {})", self.name, self.current_amount, target),
            None => write!(f, "{} ({})", self.name, self.current_amount),
        }
    }
}

/// Partial update for a savings goal. Nested options clear the field when
/// set to `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct SavingsPatch {
    pub name: Option<String>,
    pub target_amount: Option<Option<Money>>,
    pub current_amount: Option<Money>,
    pub contribution: Option<Option<(Money, Frequency)>>,
    pub goal_date: Option<Option<NaiveDate>>,
}

impl SavingsPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target_amount.is_none()
            && self.current_amount.is_none()
            && self.contribution.is_none()
            && self.goal_date.is_none()
    }

    pub fn apply(&self, savings: &mut Savings) {
        if let Some(name) = &self.name {
            savings.name = name.trim().to_string();
        }
        if let Some(target) = self.target_amount {
            savings.target_amount = target;
        }
        if let Some(current) = self.current_amount {
            savings.current_amount = current;
        }
        if let Some(contribution) = self.contribution {
            savings.set_contribution(contribution);
        }
        if let Some(goal_date) = self.goal_date {
            savings.goal_date = goal_date;
        }
    }
}

/// Validation errors for savings goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavingsValidationError {
    EmptyName,
    NegativeCurrentAmount,
    NonPositiveTarget,
    NonPositiveContribution,
}

impl fmt::Display for SavingsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Savings goal name cannot be empty"),
            Self::NegativeCurrentAmount => write!(f, "Current amount cannot be negative"),
            Self::NonPositiveTarget => write!(f, "Target amount must be greater than zero"),
            Self::NonPositiveContribution => {
                write!(f, "Recurring contribution must be greater than zero")
            }
        }
    }
}

impl std::error::Error for SavingsValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contribution_pair_stays_in_step() {
        let mut savings = Savings::new("Vacation")
            .with_contribution(Money::new(dec!(200)), Frequency::Monthly);
        assert_eq!(
            savings.recurring_contribution(),
            Some((Money::new(dec!(200)), Frequency::Monthly))
        );

        savings.set_contribution(None);
        assert_eq!(savings.recurring_contribution_amount, None);
        assert_eq!(savings.recurring_contribution_frequency, None);
        assert_eq!(savings.recurring_contribution(), None);
    }

    #[test]
    fn test_contribution_without_frequency_is_monthly() {
        let mut savings = Savings::new("Car");
        savings.recurring_contribution_amount = Some(Money::new(dec!(50)));
        assert_eq!(
            savings.recurring_contribution(),
            Some((Money::new(dec!(50)), Frequency::Monthly))
        );
    }

    #[test]
    fn test_validation() {
        let savings = Savings::new("Emergency").with_target(Money::new(dec!(1000)));
        assert!(savings.validate().is_ok());

        let mut bad = savings.clone();
        bad.current_amount = Money::new(dec!(-1));
        assert_eq!(bad.validate(), Err(SavingsValidationError::NegativeCurrentAmount));

        let mut bad = savings.clone();
        bad.target_amount = Some(Money::zero());
        assert_eq!(bad.validate(), Err(SavingsValidationError::NonPositiveTarget));

        let bad = savings.with_contribution(Money::zero(), Frequency::Weekly);
        assert_eq!(bad.validate(), Err(SavingsValidationError::NonPositiveContribution));
    }

    #[test]
    fn test_patch_clears_target() {
        let mut savings = Savings::new("House").with_target(Money::new(dec!(50000)));
        SavingsPatch {
            target_amount: Some(None),
            goal_date: Some(NaiveDate::from_ymd_opt(2030, 1, 1)),
            ..Default::default()
        }
        .apply(&mut savings);

        assert_eq!(savings.target_amount, None);
        assert_eq!(savings.goal_date, NaiveDate::from_ymd_opt(2030, 1, 1));
        assert_eq!(savings.name, "House");
    }

    #[test]
    fn test_serialization_uses_record_field_names() {
        let mut savings = Savings::new("Trip")
            .with_contribution(Money::new(dec!(75)), Frequency::Biweekly);
        savings.link_budget(BudgetId::new());

        let json = serde_json::to_value(&savings).unwrap();
        assert_eq!(json["recurringContributionAmount"], "75");
        assert_eq!(json["recurringContributionFrequency"], "biweekly");
        assert_eq!(json["linkedBudgetIds"].as_array().unwrap().len(), 1);

        let back: Savings = serde_json::from_value(json).unwrap();
        assert_eq!(back, savings);
    }
}
