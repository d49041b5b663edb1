//! Display formatting for terminal output
//!
//! Tables for record lists and aligned detail views. Money is shown with the
//! currency symbol from the user's settings.

pub mod budget;
pub mod expense;
pub mod savings;

pub use budget::{format_budget_details, format_budget_list, format_suggestion};
pub use expense::{format_expense_details, format_expense_list};
pub use savings::{format_savings_details, format_savings_list};

use std::ops::Range;

use rust_decimal::Decimal;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Money;

/// Money with the configured currency symbol
pub fn money(settings: &Settings, amount: Money) -> String {
    amount.format_with_symbol(&settings.currency_symbol)
}

/// Percentage with one decimal place
pub fn percent(value: Decimal) -> String {
    format!("{:.1}%", value)
}

/// Render rows as a table with the `numeric` columns right-aligned
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, numeric: Range<usize>) -> String {
    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(numeric)).with(Alignment::right()))
        .to_string()
}
