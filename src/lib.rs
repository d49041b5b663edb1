//! Budget planner - period-normalized budgets, expenses and savings goals
//!
//! Expenses, budgets and savings goals each carry their own cadence (daily,
//! weekly, biweekly, monthly or yearly). The engine rescales every amount to
//! the period of the budget it is counted against, so a weekly grocery bill
//! and a yearly insurance premium can share a monthly budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, budgets, savings goals, money)
//! - `engine`: Period conversion, spend and allocation calculations
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `export`: CSV import and export of expenses
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_planner::engine::convert;
//! use budget_planner::models::{Frequency, Money};
//! use rust_decimal_macros::dec;
//!
//! let monthly = convert(Money::new(dec!(100)), Frequency::Weekly, Frequency::Monthly);
//! assert_eq!(monthly.round_cents(), Money::new(dec!(434.86)));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PlannerError, PlannerResult};
