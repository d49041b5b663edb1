//! Savings goal CLI commands

use clap::Subcommand;

use super::{parse_date, parse_frequency, parse_money};
use crate::config::Settings;
use crate::display::{format_savings_details, format_savings_list};
use crate::error::{PlannerError, PlannerResult};
use crate::models::ids::matches_short_id;
use crate::models::{BudgetId, Frequency, Money, Savings, SavingsPatch};
use crate::services::{BudgetService, SavingsService, SavingsSummary};
use crate::storage::Storage;

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum SavingsCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Amount to reach
        #[arg(short, long)]
        target: Option<String>,
        /// Recurring contribution amount
        #[arg(short, long)]
        contribution: Option<String>,
        /// Contribution frequency (daily, weekly, biweekly, monthly, yearly)
        #[arg(short, long, requires = "contribution")]
        frequency: Option<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        goal_date: Option<String>,
    },
    /// List savings goals with progress
    List,
    /// Show savings goal details
    Show {
        /// Goal name or ID
        savings: String,
    },
    /// Edit a savings goal
    Edit {
        /// Goal name or ID
        savings: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, conflicts_with = "no_target")]
        target: Option<String>,
        /// Remove the target amount
        #[arg(long)]
        no_target: bool,
        /// Set the amount saved so far
        #[arg(long)]
        current: Option<String>,
        /// Recurring contribution amount
        #[arg(short, long, conflicts_with = "no_contribution")]
        contribution: Option<String>,
        /// Contribution frequency (daily, weekly, biweekly, monthly, yearly)
        #[arg(short, long, requires = "contribution")]
        frequency: Option<String>,
        /// Remove the recurring contribution
        #[arg(long)]
        no_contribution: bool,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "no_goal_date")]
        goal_date: Option<String>,
        /// Remove the target date
        #[arg(long)]
        no_goal_date: bool,
    },
    /// Delete a savings goal
    Delete {
        /// Goal name or ID
        savings: String,
    },
    /// Reserve the goal's contribution from a budget
    Link {
        /// Goal name or ID
        savings: String,
        /// Budget name or ID
        budget: String,
    },
    /// Stop reserving the goal's contribution from a budget
    Unlink {
        /// Goal name or ID
        savings: String,
        /// Budget name or ID
        budget: String,
    },
    /// Add money to a goal
    Contribute {
        /// Goal name or ID
        savings: String,
        amount: String,
    },
    /// Take money out of a goal
    Withdraw {
        /// Goal name or ID
        savings: String,
        amount: String,
    },
}

/// Handle a savings command
pub fn handle_savings_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SavingsCommands,
) -> PlannerResult<()> {
    let service = SavingsService::new(storage);
    let fmt = |amount: Money| amount.format_with_symbol(&settings.currency_symbol);

    match cmd {
        SavingsCommands::Add {
            name,
            target,
            contribution,
            frequency,
            goal_date,
        } => {
            let target = target.as_deref().map(parse_money).transpose()?;
            let contribution = parse_contribution(contribution.as_deref(), frequency.as_deref())?;
            let goal_date = goal_date.as_deref().map(parse_date).transpose()?;

            let savings = service.create(&name, target, contribution, goal_date)?;

            println!("Created savings goal: {}", savings.name);
            if let Some(target) = savings.target_amount {
                println!("  Target: {}", fmt(target));
            }
            if let Some((amount, frequency)) = savings.recurring_contribution() {
                println!("  Contribution: {} {}", fmt(amount), frequency);
            }
            println!("  ID: {}", savings.id);
        }

        SavingsCommands::List => {
            let summaries = service.list_with_progress()?;
            print!("{}", format_savings_list(&summaries, settings));
        }

        SavingsCommands::Show { savings } => {
            let found = service.require(&savings)?;
            let budgets = service.linked_budgets(&found)?;
            let summary = SavingsSummary {
                progress: service.progress(&found),
                savings: found,
            };
            print!("{}", format_savings_details(&summary, &budgets, settings));
        }

        SavingsCommands::Edit {
            savings,
            name,
            target,
            no_target,
            current,
            contribution,
            frequency,
            no_contribution,
            goal_date,
            no_goal_date,
        } => {
            let found = service.require(&savings)?;

            let target_amount = if no_target {
                Some(None)
            } else {
                target.as_deref().map(parse_money).transpose()?.map(Some)
            };

            let contribution = if no_contribution {
                Some(None)
            } else {
                parse_contribution(contribution.as_deref(), frequency.as_deref())?.map(Some)
            };

            let goal_date = if no_goal_date {
                Some(None)
            } else {
                goal_date.as_deref().map(parse_date).transpose()?.map(Some)
            };

            let patch = SavingsPatch {
                name,
                target_amount,
                current_amount: current.as_deref().map(parse_money).transpose()?,
                contribution,
                goal_date,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --name, --target, --current, --contribution or --goal-date.");
                return Ok(());
            }

            let updated = service.update(found.id, &patch)?;
            println!("Updated savings goal: {}", updated);
        }

        SavingsCommands::Delete { savings } => {
            let found = service.require(&savings)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted savings goal: {}", deleted.name);
        }

        SavingsCommands::Link { savings, budget } => {
            let found = service.require(&savings)?;
            let budget = BudgetService::new(storage).require(&budget)?;

            if found.recurring_contribution().is_none() {
                println!(
                    "Note: '{}' has no recurring contribution, so nothing is reserved yet.",
                    found.name
                );
            }

            if service.link_budget(found.id, budget.id)? {
                println!("Linked '{}' to budget '{}'", found.name, budget.name);
            } else {
                println!("'{}' is already linked to budget '{}'", found.name, budget.name);
            }
        }

        SavingsCommands::Unlink { savings, budget } => {
            let found = service.require(&savings)?;
            let budget_id = resolve_linked_budget(storage, &found, &budget)?;

            if service.unlink_budget(found.id, budget_id)? {
                println!("Unlinked '{}' from {}", found.name, budget);
            } else {
                println!("'{}' is not linked to {}", found.name, budget);
            }
        }

        SavingsCommands::Contribute { savings, amount } => {
            let found = service.require(&savings)?;
            let amount = parse_money(&amount)?;
            let updated = service.contribute(found.id, amount)?;

            println!(
                "Added {} to '{}'. Saved: {}",
                fmt(amount),
                updated.name,
                fmt(updated.current_amount)
            );
            if service.progress(&updated).is_complete() {
                println!("Goal reached!");
            }
        }

        SavingsCommands::Withdraw { savings, amount } => {
            let found = service.require(&savings)?;
            let amount = parse_money(&amount)?;
            let updated = service.withdraw(found.id, amount)?;

            println!(
                "Withdrew {} from '{}'. Saved: {}",
                fmt(amount),
                updated.name,
                fmt(updated.current_amount)
            );
        }
    }

    Ok(())
}

/// Contribution amount with its frequency, monthly when none is given
fn parse_contribution(
    amount: Option<&str>,
    frequency: Option<&str>,
) -> PlannerResult<Option<(Money, Frequency)>> {
    let Some(amount) = amount else {
        return Ok(None);
    };
    let amount = parse_money(amount)?;
    let frequency = frequency
        .map(parse_frequency)
        .transpose()?
        .unwrap_or(Frequency::Monthly);
    Ok(Some((amount, frequency)))
}

/// Resolve the budget to unlink. Budgets that have since been deleted can
/// still be named by their id.
fn resolve_linked_budget(
    storage: &Storage,
    savings: &Savings,
    identifier: &str,
) -> PlannerResult<BudgetId> {
    if let Some(budget) = BudgetService::new(storage).find(identifier)? {
        return Ok(budget.id);
    }

    if let Ok(id) = identifier.trim().parse::<BudgetId>() {
        return Ok(id);
    }

    savings
        .linked_budget_ids
        .iter()
        .copied()
        .find(|id| matches_short_id(id, identifier))
        .ok_or_else(|| PlannerError::budget_not_found(identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_contribution() {
        assert_eq!(parse_contribution(None, None).unwrap(), None);
        assert_eq!(
            parse_contribution(Some("50"), None).unwrap(),
            Some((Money::new(dec!(50)), Frequency::Monthly))
        );
        assert_eq!(
            parse_contribution(Some("20"), Some("weekly")).unwrap(),
            Some((Money::new(dec!(20)), Frequency::Weekly))
        );
        assert!(parse_contribution(Some("20"), Some("hourly")).is_err());
    }
}
