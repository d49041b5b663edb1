//! Budget status and savings progress
//!
//! Derived figures shown next to each budget and savings goal. Both are
//! recomputed from the records on every call.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

use crate::models::{Budget, Expense, Money, Savings};

use super::allocation::allocated_for_budget;
use super::spending::spent_for_budget;

/// Where a budget stands against its alert threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetAlert {
    OnTrack,
    /// Committed share has reached the alert threshold
    NearLimit,
    /// Available has gone negative
    OverBudget,
}

impl fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On track"),
            Self::NearLimit => write!(f, "Near limit"),
            Self::OverBudget => write!(f, "Over budget"),
        }
    }
}

/// Computed figures for one budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub amount: Money,
    /// Period-adjusted linked expenses
    pub spent: Money,
    /// Period-adjusted savings contributions reserved from this budget
    pub allocated: Money,
    /// amount - spent - allocated; negative when over budget
    pub available: Money,
    /// (spent + allocated) as a percent of amount
    pub percent_used: Decimal,
    pub alert: BudgetAlert,
}

impl BudgetStatus {
    pub fn compute(budget: &Budget, expenses: &[Expense], savings: &[Savings]) -> Self {
        let spent = spent_for_budget(budget, expenses);
        let allocated = allocated_for_budget(budget.id, budget.period, savings);
        let committed = spent + allocated;
        let available = budget.amount - committed;
        let percent_used = committed.percent_of(budget.amount);

        let alert = if available.is_negative() {
            BudgetAlert::OverBudget
        } else if percent_used >= Decimal::from(budget.alert_threshold) {
            BudgetAlert::NearLimit
        } else {
            BudgetAlert::OnTrack
        };

        Self {
            amount: budget.amount,
            spent,
            allocated,
            available,
            percent_used,
            alert,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.alert == BudgetAlert::OverBudget
    }
}

/// Computed progress for one savings goal
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsProgress {
    pub current: Money,
    pub target: Option<Money>,
    /// Left to save; zero once the target is reached, `None` without a target
    pub remaining: Option<Money>,
    /// Capped at 100; `None` without a target
    pub percent_complete: Option<Decimal>,
    /// Recurring contributions still needed to reach the target
    pub contributions_to_goal: Option<u64>,
}

impl SavingsProgress {
    pub fn compute(savings: &Savings) -> Self {
        let current = savings.current_amount;
        let target = savings.target_amount;

        let remaining = target.map(|t| {
            let left = t - current;
            if left.is_negative() {
                Money::zero()
            } else {
                left
            }
        });

        let percent_complete =
            target.map(|t| current.percent_of(t).min(Decimal::ONE_HUNDRED));

        let contributions_to_goal = match (remaining, savings.recurring_contribution()) {
            (Some(left), Some((amount, _))) if amount.is_positive() => {
                left.amount()
                    .checked_div(amount.amount())
                    .and_then(|count| count.ceil().to_u64())
            }
            _ => None,
        };

        Self {
            current,
            target,
            remaining,
            percent_complete,
            contributions_to_goal,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.remaining, Some(left) if left.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, ExpenseCategory, Frequency};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    fn budget_with(amount: Money, expense: &Expense) -> Budget {
        let mut budget = Budget::new("Test", amount, BudgetPeriod::Monthly);
        budget.link_expense(expense.id);
        budget
    }

    #[test]
    fn test_available_subtracts_spend_and_allocation() {
        let expense = Expense::new("Dinner", Money::new(dec!(100)), ExpenseCategory::Food, date());
        let budget = budget_with(Money::new(dec!(1000)), &expense);
        let mut goal = Savings::new("Trip").with_contribution(Money::new(dec!(300)), Frequency::Monthly);
        goal.link_budget(budget.id);

        let status = BudgetStatus::compute(&budget, &[expense], &[goal]);
        assert_eq!(status.spent.amount(), dec!(100));
        assert_eq!(status.allocated.amount(), dec!(300));
        assert_eq!(status.available.amount(), dec!(600));
        assert_eq!(status.percent_used, dec!(40));
        assert_eq!(status.alert, BudgetAlert::OnTrack);
    }

    #[test]
    fn test_near_limit_at_threshold() {
        let expense = Expense::new("Rent", Money::new(dec!(80)), ExpenseCategory::Housing, date());
        let budget = budget_with(Money::new(dec!(100)), &expense);

        let status = BudgetStatus::compute(&budget, &[expense], &[]);
        assert_eq!(status.alert, BudgetAlert::NearLimit);
        assert_eq!(status.available.amount(), dec!(20));
    }

    #[test]
    fn test_over_budget_goes_negative() {
        let expense = Expense::new("TV", Money::new(dec!(150)), ExpenseCategory::Shopping, date());
        let budget = budget_with(Money::new(dec!(100)), &expense);

        let status = BudgetStatus::compute(&budget, &[expense], &[]);
        assert_eq!(status.available.amount(), dec!(-50));
        assert!(status.is_over_budget());
    }

    #[test]
    fn test_savings_progress() {
        let mut goal = Savings::new("Laptop")
            .with_target(Money::new(dec!(1000)))
            .with_contribution(Money::new(dec!(150)), Frequency::Monthly);
        goal.current_amount = Money::new(dec!(250));

        let progress = SavingsProgress::compute(&goal);
        assert_eq!(progress.remaining, Some(Money::new(dec!(750))));
        assert_eq!(progress.percent_complete, Some(dec!(25)));
        assert_eq!(progress.contributions_to_goal, Some(5));
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_savings_progress_caps_at_target() {
        let mut goal = Savings::new("Bike").with_target(Money::new(dec!(400)));
        goal.current_amount = Money::new(dec!(500));

        let progress = SavingsProgress::compute(&goal);
        assert_eq!(progress.remaining, Some(Money::zero()));
        assert_eq!(progress.percent_complete, Some(dec!(100)));
        assert_eq!(progress.contributions_to_goal, None);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_savings_progress_without_target() {
        let goal = Savings::new("Rainy day");
        let progress = SavingsProgress::compute(&goal);
        assert_eq!(progress.remaining, None);
        assert_eq!(progress.percent_complete, None);
        assert!(!progress.is_complete());
    }
}
