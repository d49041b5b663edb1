//! Expense display formatting

use tabled::Tabled;

use super::{money, render_table};
use crate::config::Settings;
use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Repeats")]
    repeats: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of expenses as a table with a total line
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            date: settings.format_date(e.date),
            title: e.title.clone(),
            category: e.category.to_string(),
            repeats: e.recurrence().to_string(),
            amount: money(settings, e.amount),
        })
        .collect();

    let total = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expense(s), total {}\n",
        render_table(rows, 5..6),
        expenses.len(),
        money(settings, total)
    )
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.title));
    output.push_str(&format!("  ID:        {}\n", expense.id));
    output.push_str(&format!("  Amount:    {}\n", money(settings, expense.amount)));
    output.push_str(&format!("  Category:  {}\n", expense.category));
    output.push_str(&format!(
        "  Date:      {}\n",
        settings.format_date(expense.date)
    ));
    output.push_str(&format!("  Repeats:   {}\n", expense.recurrence()));
    output.push_str(&format!(
        "  Created:   {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}
