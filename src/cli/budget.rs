//! Budget CLI commands
//!
//! Implements CLI commands for budget management, linking expenses into
//! budgets, and the status and suggestion views.

use clap::Subcommand;

use super::{parse_category, parse_money, parse_period};
use crate::config::Settings;
use crate::display::{format_budget_details, format_budget_list, format_suggestion};
use crate::error::{PlannerError, PlannerResult};
use crate::models::ids::matches_short_id;
use crate::models::{Budget, BudgetPatch, ExpenseId};
use crate::services::{BudgetService, BudgetSummary, ExpenseService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a new budget
    Add {
        /// Budget name
        name: String,
        /// Budget amount per period (e.g., "400")
        amount: String,
        /// Budget period (daily, weekly, monthly, yearly)
        #[arg(short, long)]
        period: Option<String>,
        /// Expense category this budget covers
        #[arg(short, long)]
        category: Option<String>,
        /// Percent used at which to warn (1-100)
        #[arg(short, long)]
        alert: Option<u8>,
    },
    /// List budgets with their status
    List,
    /// Show budget details
    Show {
        /// Budget name or ID
        budget: String,
    },
    /// Edit a budget
    Edit {
        /// Budget name or ID
        budget: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        period: Option<String>,
        #[arg(short, long, conflicts_with = "no_category")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        no_category: bool,
        /// Percent used at which to warn (1-100)
        #[arg(long)]
        alert: Option<u8>,
    },
    /// Delete a budget
    Delete {
        /// Budget name or ID
        budget: String,
    },
    /// Count an expense against a budget
    Link {
        /// Budget name or ID
        budget: String,
        /// Expense title or ID
        expense: String,
    },
    /// Stop counting an expense against a budget
    Unlink {
        /// Budget name or ID
        budget: String,
        /// Expense title or ID
        expense: String,
    },
    /// Show spent, allocated and available
    Status {
        /// Budget name or ID; all budgets when omitted
        budget: Option<String>,
    },
    /// Suggest a budget amount from recorded expenses
    Suggest {
        /// Only use expenses in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Budget period (daily, weekly, monthly, yearly)
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> PlannerResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Add {
            name,
            amount,
            period,
            category,
            alert,
        } => {
            let amount = parse_money(&amount)?;
            let period = match period {
                Some(p) => parse_period(&p)?,
                None => settings.default_budget_period,
            };
            let category = category.as_deref().map(parse_category).transpose()?;
            let alert = alert.unwrap_or(settings.default_alert_threshold);

            let budget = service.create(&name, amount, period, category, alert)?;

            println!("Created budget: {}", budget.name);
            println!(
                "  Amount: {} {}",
                budget.amount.format_with_symbol(&settings.currency_symbol),
                budget.period
            );
            if let Some(category) = budget.category {
                println!("  Category: {}", category);
            }
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List => {
            let summaries = service.status_all()?;
            print!("{}", format_budget_list(&summaries, settings));
        }

        BudgetCommands::Show { budget } => {
            let found = service.require(&budget)?;
            print_details(&service, found, settings)?;
        }

        BudgetCommands::Edit {
            budget,
            name,
            amount,
            period,
            category,
            no_category,
            alert,
        } => {
            let found = service.require(&budget)?;

            let category = if no_category {
                Some(None)
            } else {
                category
                    .as_deref()
                    .map(parse_category)
                    .transpose()?
                    .map(Some)
            };

            let patch = BudgetPatch {
                name,
                amount: amount.as_deref().map(parse_money).transpose()?,
                category,
                period: period.as_deref().map(parse_period).transpose()?,
                alert_threshold: alert,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --name, --amount, --period, --category, --no-category or --alert.");
                return Ok(());
            }

            let updated = service.update(found.id, &patch)?;
            println!("Updated budget: {}", updated);
        }

        BudgetCommands::Delete { budget } => {
            let found = service.require(&budget)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted budget: {}", deleted.name);
        }

        BudgetCommands::Link { budget, expense } => {
            let found = service.require(&budget)?;
            let expense = ExpenseService::new(storage).require(&expense)?;

            if service.link_expense(found.id, expense.id)? {
                println!("Linked '{}' to budget '{}'", expense.title, found.name);
            } else {
                println!("'{}' is already linked to budget '{}'", expense.title, found.name);
            }
        }

        BudgetCommands::Unlink { budget, expense } => {
            let found = service.require(&budget)?;
            let expense_id = resolve_linked_expense(storage, &found, &expense)?;

            if service.unlink_expense(found.id, expense_id)? {
                println!("Unlinked {} from budget '{}'", expense, found.name);
            } else {
                println!("{} is not linked to budget '{}'", expense, found.name);
            }
        }

        BudgetCommands::Status { budget } => match budget {
            Some(budget) => {
                let found = service.require(&budget)?;
                print_details(&service, found, settings)?;
            }
            None => {
                let summaries = service.status_all()?;
                print!("{}", format_budget_list(&summaries, settings));
            }
        },

        BudgetCommands::Suggest { category, period } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let period = match period {
                Some(p) => parse_period(&p)?,
                None => settings.default_budget_period,
            };

            let raw = service.suggest(category, period)?;
            println!("{}", format_suggestion(raw, category, period, settings));
        }
    }

    Ok(())
}

fn print_details(service: &BudgetService, budget: Budget, settings: &Settings) -> PlannerResult<()> {
    let status = service.status(&budget)?;
    let linked = service.linked_expenses(&budget)?;
    let goals = service.linked_savings(budget.id)?;
    let summary = BudgetSummary { budget, status };

    print!("{}", format_budget_details(&summary, &linked, &goals, settings));
    Ok(())
}

/// Resolve the expense to unlink. Expenses that have since been deleted can
/// still be named by their id.
fn resolve_linked_expense(
    storage: &Storage,
    budget: &Budget,
    identifier: &str,
) -> PlannerResult<ExpenseId> {
    if let Some(expense) = ExpenseService::new(storage).find(identifier)? {
        return Ok(expense.id);
    }

    if let Ok(id) = identifier.trim().parse::<ExpenseId>() {
        return Ok(id);
    }

    budget
        .linked_expense_ids
        .iter()
        .copied()
        .find(|id| matches_short_id(id, identifier))
        .ok_or_else(|| PlannerError::expense_not_found(identifier))
}
