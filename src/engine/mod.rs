//! Period normalization and allocation engine
//!
//! Pure functions over already-loaded records. Nothing here performs I/O,
//! holds state, or fails: empty inputs give zero, and every call recomputes
//! from the records it is handed.
//!
//! - `convert`: rescale an amount between cadences
//! - `spending`: period-adjusted spend of a budget's linked expenses
//! - `allocation`: savings contributions reserved from a budget
//! - `suggestion`: budget amount estimated from past expenses
//! - `status`: per-budget and per-goal derived figures

pub mod allocation;
pub mod convert;
pub mod spending;
pub mod status;
pub mod suggestion;

pub use allocation::allocated_for_budget;
pub use convert::{convert, period_adjusted};
pub use spending::spent_for_budget;
pub use status::{BudgetAlert, BudgetStatus, SavingsProgress};
pub use suggestion::{round_suggestion, suggest_budget, SUGGESTION_STEP};
