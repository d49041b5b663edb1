//! Savings goal display formatting

use tabled::Tabled;

use super::{money, percent, render_table};
use crate::config::Settings;
use crate::models::Budget;
use crate::services::SavingsSummary;

#[derive(Tabled)]
struct SavingsRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Saved")]
    current: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
    #[tabled(rename = "Budgets")]
    budgets: usize,
}

/// Format savings goals with their progress as a table
pub fn format_savings_list(summaries: &[SavingsSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No savings goals found.".to_string();
    }

    let rows: Vec<SavingsRow> = summaries
        .iter()
        .map(|s| SavingsRow {
            name: s.savings.name.clone(),
            current: money(settings, s.progress.current),
            target: s
                .progress
                .target
                .map(|t| money(settings, t))
                .unwrap_or_else(|| "-".to_string()),
            progress: s
                .progress
                .percent_complete
                .map(percent)
                .unwrap_or_else(|| "-".to_string()),
            contribution: s
                .savings
                .recurring_contribution()
                .map(|(amount, f)| format!("{} {}", money(settings, amount), f))
                .unwrap_or_else(|| "-".to_string()),
            budgets: s.savings.linked_budget_ids.len(),
        })
        .collect();

    let total = summaries.iter().map(|s| s.progress.current).sum();
    format!(
        "{}\nTotal saved: {}\n",
        render_table(rows, 1..4),
        money(settings, total)
    )
}

/// Format one savings goal. `budgets` are the budgets it is linked to that
/// still exist.
pub fn format_savings_details(
    summary: &SavingsSummary,
    budgets: &[Budget],
    settings: &Settings,
) -> String {
    let savings = &summary.savings;
    let progress = &summary.progress;

    let mut output = String::new();
    output.push_str(&format!("Savings goal: {}\n", savings.name));
    output.push_str(&format!("  ID:            {}\n", savings.id));
    output.push_str(&format!("  Saved:         {}\n", money(settings, progress.current)));

    if let Some(target) = progress.target {
        output.push_str(&format!("  Target:        {}\n", money(settings, target)));
    }
    if let Some(remaining) = progress.remaining {
        output.push_str(&format!("  Remaining:     {}\n", money(settings, remaining)));
    }
    if let Some(pct) = progress.percent_complete {
        let done = if progress.is_complete() { " (reached)" } else { "" };
        output.push_str(&format!("  Progress:      {}{}\n", percent(pct), done));
    }
    if let Some(goal_date) = savings.goal_date {
        output.push_str(&format!(
            "  Goal date:     {}\n",
            settings.format_date(goal_date)
        ));
    }

    match savings.recurring_contribution() {
        Some((amount, frequency)) => {
            output.push_str(&format!(
                "  Contribution:  {} {}\n",
                money(settings, amount),
                frequency
            ));
            if let Some(count) = progress.contributions_to_goal.filter(|&n| n > 0) {
                output.push_str(&format!("  To goal:       {} more contribution(s)\n", count));
            }
        }
        None => output.push_str("  Contribution:  none\n"),
    }

    if !savings.linked_budget_ids.is_empty() {
        output.push_str("\nReserved from budgets:\n");
        for budget in budgets {
            output.push_str(&format!("  {}  {}\n", budget.id, budget.name));
        }
        let missing = savings.linked_budget_ids.len().saturating_sub(budgets.len());
        if missing > 0 {
            output.push_str(&format!("  ({} link(s) to deleted budgets ignored)\n", missing));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SavingsProgress;
    use crate::models::{BudgetPeriod, Frequency, Money, Savings};
    use rust_decimal_macros::dec;

    fn summary(savings: Savings) -> SavingsSummary {
        SavingsSummary {
            progress: SavingsProgress::compute(&savings),
            savings,
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_savings_list(&[], &Settings::default()),
            "No savings goals found."
        );
    }

    #[test]
    fn test_list() {
        let mut goal = Savings::new("Car")
            .with_target(Money::new(dec!(8000)))
            .with_contribution(Money::new(dec!(200)), Frequency::Monthly);
        goal.current_amount = Money::new(dec!(2000));

        let output = format_savings_list(&[summary(goal)], &Settings::default());
        assert!(output.contains("$2000.00"));
        assert!(output.contains("25.0%"));
        assert!(output.contains("$200.00 Monthly"));
        assert!(output.contains("Total saved: $2000.00"));
    }

    #[test]
    fn test_details_with_deleted_budget_link() {
        let budget = Budget::new("Household", Money::new(dec!(1500)), BudgetPeriod::Monthly);
        let mut goal = Savings::new("Holiday")
            .with_target(Money::new(dec!(1200)))
            .with_contribution(Money::new(dec!(100)), Frequency::Monthly);
        goal.link_budget(budget.id);
        goal.link_budget(crate::models::BudgetId::new());

        let output = format_savings_details(&summary(goal), &[budget], &Settings::default());
        assert!(output.contains("Remaining:     $1200.00"));
        assert!(output.contains("To goal:       12 more contribution(s)"));
        assert!(output.contains("Household"));
        assert!(output.contains("(1 link(s) to deleted budgets ignored)"));
    }
}
