//! CSV interchange for expenses
//!
//! Export writes every stored expense; import creates expenses through the
//! expense service and reports bad rows instead of failing the whole file.

pub mod csv;

pub use self::csv::{export_expenses_csv, import_expenses_csv, ImportSummary, RowError};
