//! Savings allocation
//!
//! Works out how much of a budget is earmarked for savings contributions.
//! A goal linked to several budgets reserves its full converted contribution
//! in each of them; the allocation is a planning overlay, not a transfer, so
//! the same money can appear under more than one budget.

use crate::models::{BudgetId, BudgetPeriod, Money, Savings};

use super::convert::convert;

/// Sum of the recurring contributions of every goal linked to `budget_id`,
/// each converted into `budget_period`. Goals without a recurring
/// contribution are skipped.
pub fn allocated_for_budget(
    budget_id: BudgetId,
    budget_period: BudgetPeriod,
    savings: &[Savings],
) -> Money {
    let target = budget_period.frequency();
    savings
        .iter()
        .filter(|s| s.is_linked_to(budget_id))
        .filter_map(|s| s.recurring_contribution())
        .map(|(amount, frequency)| convert(amount, frequency, target))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use rust_decimal_macros::dec;

    fn goal(name: &str, amount: Money, frequency: Frequency, budget: BudgetId) -> Savings {
        let mut savings = Savings::new(name).with_contribution(amount, frequency);
        savings.link_budget(budget);
        savings
    }

    #[test]
    fn test_two_goals_same_budget() {
        let budget_id = BudgetId::new();
        let goals = vec![
            goal("Trip", Money::new(dec!(300)), Frequency::Monthly, budget_id),
            goal("Car", Money::new(dec!(300)), Frequency::Monthly, budget_id),
        ];

        let allocated = allocated_for_budget(budget_id, BudgetPeriod::Monthly, &goals);
        assert_eq!(allocated.amount(), dec!(600));
    }

    #[test]
    fn test_contribution_is_period_converted() {
        let budget_id = BudgetId::new();
        let goals = vec![goal("Fund", Money::new(dec!(70)), Frequency::Weekly, budget_id)];

        let allocated = allocated_for_budget(budget_id, BudgetPeriod::Daily, &goals);
        assert_eq!(allocated.amount(), dec!(10));
    }

    #[test]
    fn test_goal_without_contribution_is_skipped() {
        let budget_id = BudgetId::new();
        let mut passive = Savings::new("Passive");
        passive.link_budget(budget_id);
        let goals = vec![
            passive,
            goal("Active", Money::new(dec!(50)), Frequency::Monthly, budget_id),
        ];

        let allocated = allocated_for_budget(budget_id, BudgetPeriod::Monthly, &goals);
        assert_eq!(allocated.amount(), dec!(50));
    }

    #[test]
    fn test_unlinked_goals_do_not_count() {
        let budget_id = BudgetId::new();
        let goals = vec![goal("Other", Money::new(dec!(500)), Frequency::Monthly, BudgetId::new())];

        assert!(allocated_for_budget(budget_id, BudgetPeriod::Monthly, &goals).is_zero());
        assert!(allocated_for_budget(budget_id, BudgetPeriod::Monthly, &[]).is_zero());
    }

    #[test]
    fn test_multi_budget_goal_counts_in_full_for_each() {
        let first = BudgetId::new();
        let second = BudgetId::new();
        let mut shared = Savings::new("Shared").with_contribution(Money::new(dec!(120)), Frequency::Monthly);
        shared.link_budget(first);
        shared.link_budget(second);
        let goals = vec![shared];

        assert_eq!(
            allocated_for_budget(first, BudgetPeriod::Monthly, &goals).amount(),
            dec!(120)
        );
        assert_eq!(
            allocated_for_budget(second, BudgetPeriod::Monthly, &goals).amount(),
            dec!(120)
        );
    }
}
