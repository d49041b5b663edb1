//! Budget expense aggregation

use crate::models::{Budget, Expense, Money};

use super::convert::period_adjusted;

/// Period-adjusted total of the expenses linked to `budget`.
///
/// Expenses not in `linked_expense_ids` never contribute, and linked ids with
/// no matching expense are ignored.
pub fn spent_for_budget(budget: &Budget, expenses: &[Expense]) -> Money {
    let target = budget.period.frequency();
    expenses
        .iter()
        .filter(|e| budget.is_linked(e.id))
        .map(|e| period_adjusted(e.amount, e.recurrence(), target))
        .sum()
}
