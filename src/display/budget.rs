//! Budget display formatting
//!
//! Budget tables show the computed status next to each budget: what linked
//! expenses cost over the budget's period, what linked savings goals reserve,
//! and what is left.

use tabled::Tabled;

use super::{money, percent, render_table};
use crate::config::Settings;
use crate::engine::{convert, period_adjusted, round_suggestion, BudgetStatus};
use crate::models::{BudgetPeriod, ExpenseCategory, Frequency, Money, Savings};
use crate::services::{BudgetSummary, LinkedExpenses};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    amount: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    alert: String,
}

/// Format budgets with their status as a table
pub fn format_budget_list(summaries: &[BudgetSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows: Vec<BudgetRow> = summaries
        .iter()
        .map(|s| BudgetRow {
            name: s.budget.name.clone(),
            period: s.budget.period.to_string(),
            category: s
                .budget
                .category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            amount: money(settings, s.status.amount),
            spent: money(settings, s.status.spent),
            allocated: money(settings, s.status.allocated),
            available: money(settings, s.status.available),
            used: percent(s.status.percent_used),
            alert: s.status.alert.to_string(),
        })
        .collect();

    let mut output = render_table(rows, 3..8);
    output.push('\n');

    let over: Vec<&str> = summaries
        .iter()
        .filter(|s| s.status.is_over_budget())
        .map(|s| s.budget.name.as_str())
        .collect();
    if !over.is_empty() {
        output.push_str(&format!("Over budget: {}\n", over.join(", ")));
    }

    output
}

/// Format one budget with its status, linked expenses and reserving goals
pub fn format_budget_details(
    summary: &BudgetSummary,
    linked: &LinkedExpenses,
    goals: &[Savings],
    settings: &Settings,
) -> String {
    let budget = &summary.budget;
    let status: &BudgetStatus = &summary.status;
    let target = budget.period.frequency();

    let mut output = String::new();
    output.push_str(&format!("Budget: {}\n", budget.name));
    output.push_str(&format!("  ID:              {}\n", budget.id));
    output.push_str(&format!("  Period:          {}\n", budget.period));
    if let Some(category) = budget.category {
        output.push_str(&format!("  Category:        {}\n", category));
    }
    output.push_str(&format!("  Alert at:        {}%\n", budget.alert_threshold));
    output.push('\n');
    output.push_str(&format!("  Amount:          {}\n", money(settings, status.amount)));
    output.push_str(&format!("  Spent:           {}\n", money(settings, status.spent)));
    output.push_str(&format!("  Allocated:       {}\n", money(settings, status.allocated)));
    output.push_str(&format!(
        "  Available:       {}\n",
        money(settings, status.available)
    ));
    output.push_str(&format!(
        "  Used:            {} ({})\n",
        percent(status.percent_used),
        status.alert
    ));

    if !linked.found.is_empty() || !linked.dangling.is_empty() {
        output.push_str("\nLinked expenses:\n");
        for expense in &linked.found {
            let adjusted = period_adjusted(expense.amount, expense.recurrence(), target);
            output.push_str(&format!(
                "  {}  {:<24} {:>12}  ({} {})\n",
                expense.id,
                expense.title,
                money(settings, adjusted),
                money(settings, expense.amount),
                expense.recurrence()
            ));
        }
        if !linked.dangling.is_empty() {
            output.push_str(&format!(
                "  ({} link(s) to deleted expenses ignored)\n",
                linked.dangling.len()
            ));
        }
    }

    let reserving: Vec<(&Savings, Money, Frequency)> = goals
        .iter()
        .filter_map(|g| g.recurring_contribution().map(|(amount, f)| (g, amount, f)))
        .collect();
    if !reserving.is_empty() {
        output.push_str("\nSavings reserved:\n");
        for (goal, amount, frequency) in reserving {
            output.push_str(&format!(
                "  {}  {:<24} {:>12}  ({} {})\n",
                goal.id,
                goal.name,
                money(settings, convert(amount, frequency, target)),
                money(settings, amount),
                frequency
            ));
        }
    }

    output
}

/// Format a budget suggestion, rounded up to the next ten when configured
pub fn format_suggestion(
    raw: Money,
    category: Option<ExpenseCategory>,
    period: BudgetPeriod,
    settings: &Settings,
) -> String {
    let scope = category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "all categories".to_string());

    if raw.is_zero() {
        return format!("No expenses recorded for {}; nothing to suggest.", scope);
    }

    let shown = if settings.round_suggestions {
        round_suggestion(raw)
    } else {
        raw.round_cents()
    };

    format!(
        "Suggested {} budget for {}: {} (from {})",
        period,
        scope,
        money(settings, shown),
        money(settings, raw)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Expense};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn summary_for(budget: Budget, expenses: &[Expense], goals: &[Savings]) -> BudgetSummary {
        let status = BudgetStatus::compute(&budget, expenses, goals);
        BudgetSummary { budget, status }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_budget_list(&[], &Settings::default()), "No budgets found.");
    }

    #[test]
    fn test_list_flags_over_budget() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let tv = Expense::new("TV", Money::new(dec!(500)), ExpenseCategory::Shopping, date);
        let mut budget = Budget::new("Shopping", Money::new(dec!(200)), BudgetPeriod::Monthly);
        budget.link_expense(tv.id);

        let summaries = vec![summary_for(budget, &[tv], &[])];
        let output = format_budget_list(&summaries, &Settings::default());

        assert!(output.contains("-$300.00"));
        assert!(output.contains("Over budget: Shopping"));
    }

    #[test]
    fn test_details_show_reserved_savings() {
        let budget = Budget::new("Household", Money::new(dec!(1000)), BudgetPeriod::Monthly);
        let mut goal = Savings::new("Holiday").with_contribution(Money::new(dec!(100)), Frequency::Weekly);
        goal.link_budget(budget.id);
        let goals = vec![goal];

        let summary = summary_for(budget, &[], &goals);
        let output = format_budget_details(
            &summary,
            &LinkedExpenses::default(),
            &goals,
            &Settings::default(),
        );

        assert!(output.contains("Savings reserved:"));
        assert!(output.contains("$434.86"));
        assert!(output.contains("Available:       $565.14"));
    }

    #[test]
    fn test_suggestion_rounding() {
        let raw = Money::new(dec!(217.43));
        let settings = Settings::default();

        let output = format_suggestion(raw, Some(ExpenseCategory::Food), BudgetPeriod::Monthly, &settings);
        assert!(output.contains("$220.00"));
        assert!(output.contains("from $217.43"));

        let unrounded = Settings {
            round_suggestions: false,
            ..Settings::default()
        };
        let output = format_suggestion(raw, None, BudgetPeriod::Monthly, &unrounded);
        assert!(output.contains("all categories: $217.43"));
    }

    #[test]
    fn test_empty_suggestion() {
        let output = format_suggestion(Money::zero(), None, BudgetPeriod::Weekly, &Settings::default());
        assert_eq!(output, "No expenses recorded for all categories; nothing to suggest.");
    }
}
