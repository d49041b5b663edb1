//! Budget suggestions from past spending

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{BudgetPeriod, Expense, ExpenseCategory, Money};

use super::convert::period_adjusted;

/// Display suggestions are rounded up to a multiple of this
pub const SUGGESTION_STEP: Decimal = dec!(10);

/// Suggested budget amount for `category` (or every category when `None`)
/// over `period`: the period-adjusted sum of the matching expenses.
///
/// Zero means there was nothing to base a suggestion on, not zero spend.
pub fn suggest_budget(
    expenses: &[Expense],
    category: Option<ExpenseCategory>,
    period: BudgetPeriod,
) -> Money {
    let target = period.frequency();
    expenses
        .iter()
        .filter(|e| category.map_or(true, |c| e.category == c))
        .map(|e| period_adjusted(e.amount, e.recurrence(), target))
        .sum()
}

/// Round a raw suggestion up to the next multiple of ten for display
pub fn round_suggestion(raw: Money) -> Money {
    raw.round_up_to(SUGGESTION_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_no_expenses_is_zero() {
        let suggestion = suggest_budget(&[], Some(ExpenseCategory::Food), BudgetPeriod::Monthly);
        assert!(suggestion.is_zero());
    }

    #[test]
    fn test_category_filter() {
        let expenses = vec![
            Expense::recurring(
                "Groceries",
                Money::new(dec!(100)),
                ExpenseCategory::Food,
                date(),
                Frequency::Weekly,
            ),
            Expense::new("Movie", Money::new(dec!(15)), ExpenseCategory::Entertainment, date()),
        ];

        let food = suggest_budget(&expenses, Some(ExpenseCategory::Food), BudgetPeriod::Monthly);
        assert_eq!(food.round_cents().amount(), dec!(434.86));

        let fun = suggest_budget(
            &expenses,
            Some(ExpenseCategory::Entertainment),
            BudgetPeriod::Monthly,
        );
        assert_eq!(fun.amount(), dec!(15));

        let none = suggest_budget(&expenses, Some(ExpenseCategory::Health), BudgetPeriod::Monthly);
        assert!(none.is_zero());
    }

    #[test]
    fn test_all_categories_when_unfiltered() {
        let expenses = vec![
            Expense::recurring(
                "Bus pass",
                Money::new(dec!(7)),
                ExpenseCategory::Transport,
                date(),
                Frequency::Daily,
            ),
            Expense::new("Book", Money::new(dec!(20)), ExpenseCategory::Education, date()),
        ];

        let all = suggest_budget(&expenses, None, BudgetPeriod::Weekly);
        assert_eq!(all.amount(), dec!(69));
    }

    #[test]
    fn test_round_suggestion() {
        assert_eq!(round_suggestion(Money::new(dec!(434.86))).amount(), dec!(440));
        assert_eq!(round_suggestion(Money::new(dec!(100))).amount(), dec!(100));
        assert!(round_suggestion(Money::zero()).is_zero());
    }
}
