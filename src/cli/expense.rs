//! Expense CLI commands

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use chrono::Local;
use clap::Subcommand;

use super::{parse_category, parse_date, parse_frequency, parse_money};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{PlannerError, PlannerResult};
use crate::export::{export_expenses_csv, import_expenses_csv};
use crate::models::{ExpensePatch, Recurrence};
use crate::services::{BudgetService, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category (food, transport, housing, utilities, entertainment, health, shopping, education, other)
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Repeats at this frequency (daily, weekly, biweekly, monthly, yearly)
        #[arg(short, long, value_name = "FREQUENCY")]
        recurring: Option<String>,
        /// Count the expense against this budget
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// List expenses
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show expense details
    Show {
        /// Expense title or ID
        expense: String,
    },
    /// Edit an expense
    Edit {
        /// Expense title or ID
        expense: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        /// Make the expense repeat at this frequency
        #[arg(short, long, value_name = "FREQUENCY", conflicts_with = "one_off")]
        recurring: Option<String>,
        /// Make the expense a one-off
        #[arg(long)]
        one_off: bool,
    },
    /// Delete an expense
    Delete {
        /// Expense title or ID
        expense: String,
    },
    /// Import expenses from a CSV file
    Import {
        /// Path to CSV file with title,amount,category,date columns
        file: String,
    },
    /// Export expenses to CSV
    Export {
        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> PlannerResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
            recurring,
            budget,
        } => {
            let amount = parse_money(&amount)?;
            let category = settings.category_or_default(category.as_deref().map(parse_category).transpose()?);
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            let recurrence = match recurring {
                Some(f) => Recurrence::Recurring(parse_frequency(&f)?),
                None => Recurrence::OneOff,
            };

            // Resolve the budget first so a bad name doesn't leave an unlinked expense
            let budget = budget
                .map(|b| BudgetService::new(storage).require(&b))
                .transpose()?;

            let expense = service.create(&title, amount, category, date, recurrence)?;

            println!("Recorded expense: {}", expense.title);
            println!("  Amount:   {}", expense.amount.format_with_symbol(&settings.currency_symbol));
            println!("  Category: {}", expense.category);
            println!("  Repeats:  {}", expense.recurrence());
            println!("  ID:       {}", expense.id);

            if let Some(budget) = budget {
                BudgetService::new(storage).link_expense(budget.id, expense.id)?;
                println!("  Linked to budget: {}", budget.name);
            }
        }

        ExpenseCommands::List { category } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let expenses = service.list(category)?;
            print!("{}", format_expense_list(&expenses, settings));
        }

        ExpenseCommands::Show { expense } => {
            let found = service.require(&expense)?;
            print!("{}", format_expense_details(&found, settings));
        }

        ExpenseCommands::Edit {
            expense,
            title,
            amount,
            category,
            date,
            recurring,
            one_off,
        } => {
            let found = service.require(&expense)?;

            let recurrence = match (recurring, one_off) {
                (Some(f), _) => Some(Recurrence::Recurring(parse_frequency(&f)?)),
                (None, true) => Some(Recurrence::OneOff),
                (None, false) => None,
            };

            let patch = ExpensePatch {
                title,
                amount: amount.as_deref().map(parse_money).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                recurrence,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --title, --amount, --category, --date, --recurring or --one-off.");
                return Ok(());
            }

            let updated = service.update(found.id, &patch)?;
            println!("Updated expense: {}", updated);
        }

        ExpenseCommands::Delete { expense } => {
            let found = service.require(&expense)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted expense: {}", deleted.title);
        }

        ExpenseCommands::Import { file } => {
            let reader = File::open(&file)
                .map_err(|e| PlannerError::Import(format!("Cannot open '{}': {}", file, e)))?;
            let default_category = settings.category_or_default(None);
            let summary = import_expenses_csv(storage, BufReader::new(reader), default_category)?;

            println!("Imported {} expense(s) from {}", summary.imported(), file);
            if summary.has_errors() {
                println!("Skipped {} row(s):", summary.errors.len());
                for error in &summary.errors {
                    println!("  line {}: {}", error.line, error.message);
                }
            }
        }

        ExpenseCommands::Export { output } => match output {
            Some(path) => {
                let file = File::create(&path)
                    .map_err(|e| PlannerError::Export(format!("Cannot create '{}': {}", path, e)))?;
                let count = export_expenses_csv(storage, BufWriter::new(file))?;
                println!("Exported {} expense(s) to {}", count, path);
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                export_expenses_csv(storage, &mut handle)?;
                handle.flush()?;
            }
        },
    }

    Ok(())
}
