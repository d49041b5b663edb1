//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the service layer.

pub mod budget;
pub mod convert;
pub mod expense;
pub mod savings;

pub use budget::{handle_budget_command, BudgetCommands};
pub use convert::handle_convert_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use savings::{handle_savings_command, SavingsCommands};

use chrono::NaiveDate;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetPeriod, ExpenseCategory, Frequency, Money};

pub(crate) fn parse_money(input: &str) -> PlannerResult<Money> {
    Money::parse(input).map_err(|e| {
        PlannerError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50' or '1,200'. Error: {}",
            input, e
        ))
    })
}

pub(crate) fn parse_category(input: &str) -> PlannerResult<ExpenseCategory> {
    ExpenseCategory::parse(input).ok_or_else(|| {
        let valid: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.as_str()).collect();
        PlannerError::Validation(format!(
            "Invalid category: '{}'. Valid categories: {}",
            input,
            valid.join(", ")
        ))
    })
}

pub(crate) fn parse_frequency(input: &str) -> PlannerResult<Frequency> {
    Frequency::parse(input).ok_or_else(|| {
        PlannerError::Validation(format!(
            "Invalid frequency: '{}'. Valid frequencies: daily, weekly, biweekly, monthly, yearly",
            input
        ))
    })
}

pub(crate) fn parse_period(input: &str) -> PlannerResult<BudgetPeriod> {
    BudgetPeriod::parse(input).ok_or_else(|| {
        PlannerError::Validation(format!(
            "Invalid budget period: '{}'. Valid periods: daily, weekly, monthly, yearly",
            input
        ))
    })
}

pub(crate) fn parse_date(input: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        PlannerError::Validation(format!(
            "Invalid date: '{}'. Use the format YYYY-MM-DD",
            input
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_money("1,200.50").unwrap(), Money::new(dec!(1200.50)));
        assert!(parse_money("twelve").unwrap_err().is_validation());

        assert_eq!(parse_category("Groceries").unwrap(), ExpenseCategory::Food);
        let err = parse_category("pets").unwrap_err().to_string();
        assert!(err.contains("food, transport"));

        assert_eq!(parse_frequency("fortnightly").unwrap(), Frequency::Biweekly);
        assert!(parse_period("biweekly").is_err());
        assert_eq!(
            parse_date("2025-07-04").unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
        );
        assert!(parse_date("04/07/2025").is_err());
    }
}
