//! Core data models for the budget planner
//!
//! This module contains the records the planner works over: expenses,
//! budgets, savings goals, and the money and cadence types they share.

pub mod budget;
pub mod category;
pub mod expense;
pub mod frequency;
pub mod ids;
pub mod money;
pub mod savings;

pub use budget::{Budget, BudgetPatch, BudgetValidationError, DEFAULT_ALERT_THRESHOLD};
pub use category::ExpenseCategory;
pub use expense::{Expense, ExpensePatch, ExpenseValidationError};
pub use frequency::{BudgetPeriod, Frequency, Recurrence};
pub use ids::{BudgetId, ExpenseId, SavingsId};
pub use money::{Money, MoneyParseError};
pub use savings::{Savings, SavingsPatch, SavingsValidationError};
