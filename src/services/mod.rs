//! Service layer for the budget planner
//!
//! Services sit on top of the storage layer and handle validation, links
//! between records, and the computed figures from the period engine. Every
//! mutation is saved immediately and written to the audit log.

pub mod budget;
pub mod expense;
pub mod savings;

pub use budget::{BudgetService, BudgetSummary, LinkedExpenses};
pub use expense::ExpenseService;
pub use savings::{SavingsService, SavingsSummary};
