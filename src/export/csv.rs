//! CSV export and import of expenses

use std::collections::HashMap;
use std::io::{Read, Write};

use ::csv::{ReaderBuilder, StringRecord, Trim, Writer};
use chrono::NaiveDate;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{ExpenseCategory, ExpenseId, Frequency, Money, Recurrence};
use crate::services::ExpenseService;
use crate::storage::Storage;

const EXPORT_HEADERS: [&str; 7] = [
    "id",
    "title",
    "amount",
    "category",
    "date",
    "is_recurring",
    "recurring_frequency",
];

const REQUIRED_IMPORT_HEADERS: [&str; 4] = ["title", "amount", "category", "date"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Write all expenses to CSV, oldest first. Returns the number written.
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> PlannerResult<usize> {
    let expenses = storage.expenses.get_all()?;
    let mut csv = Writer::from_writer(writer);

    csv.write_record(EXPORT_HEADERS).map_err(export_error)?;

    for expense in &expenses {
        let frequency = expense
            .recurrence()
            .frequency()
            .map(|f| f.as_str())
            .unwrap_or("");

        csv.write_record([
            expense.id.as_uuid().to_string(),
            expense.title.clone(),
            format!("{:.2}", expense.amount.amount()),
            expense.category.as_str().to_string(),
            expense.date.format(DATE_FORMAT).to_string(),
            expense.is_recurring.to_string(),
            frequency.to_string(),
        ])
        .map_err(export_error)?;
    }

    csv.flush()?;
    tracing::debug!(count = expenses.len(), "exported expenses to CSV");
    Ok(expenses.len())
}

fn export_error(e: ::csv::Error) -> PlannerError {
    PlannerError::Export(e.to_string())
}

/// A row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Line in the file, counting the header as line 1
    pub line: usize,
    pub message: String,
}

/// Result of a CSV import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub imported_ids: Vec<ExpenseId>,
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.imported_ids.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A parsed row, ready to be created
struct ImportRow {
    title: String,
    amount: Money,
    category: ExpenseCategory,
    date: NaiveDate,
    recurrence: Recurrence,
}

/// Import expenses from CSV.
///
/// The header row must name `title`, `amount`, `category` and `date`;
/// `is_recurring` and `recurring_frequency` are optional. An empty category
/// falls back to `default_category`. Rows that fail to parse or validate are
/// skipped and listed in the summary.
pub fn import_expenses_csv<R: Read>(
    storage: &Storage,
    reader: R,
    default_category: ExpenseCategory,
) -> PlannerResult<ImportSummary> {
    let mut csv = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = column_index(csv.headers()?)?;
    let service = ExpenseService::new(storage);
    let mut summary = ImportSummary::default();

    for (idx, result) in csv.records().enumerate() {
        let line = idx + 2;

        let row = match result {
            Ok(record) => parse_row(&record, &columns, default_category),
            Err(e) => Err(format!("Error reading CSV record: {}", e)),
        };

        let created = row.and_then(|row| {
            service
                .create(&row.title, row.amount, row.category, row.date, row.recurrence)
                .map_err(|e| e.to_string())
        });

        match created {
            Ok(expense) => summary.imported_ids.push(expense.id),
            Err(message) => {
                tracing::warn!(line, %message, "skipped CSV row");
                summary.errors.push(RowError { line, message });
            }
        }
    }

    tracing::info!(
        imported = summary.imported(),
        skipped = summary.errors.len(),
        "imported expenses from CSV"
    );
    Ok(summary)
}

fn column_index(headers: &StringRecord) -> PlannerResult<HashMap<String, usize>> {
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    let missing: Vec<&str> = REQUIRED_IMPORT_HEADERS
        .iter()
        .copied()
        .filter(|h| !columns.contains_key(*h))
        .collect();

    if !missing.is_empty() {
        return Err(PlannerError::Import(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        )));
    }

    Ok(columns)
}

fn parse_row(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    default_category: ExpenseCategory,
) -> Result<ImportRow, String> {
    let field = |name: &str| column(record, columns, name);

    let title = field("title").to_string();
    if title.is_empty() {
        return Err("Missing title".to_string());
    }

    let amount = Money::parse(field("amount")).map_err(|e| e.to_string())?;

    let category = match field("category") {
        "" => default_category,
        raw => ExpenseCategory::parse(raw).ok_or_else(|| format!("Unknown category: {}", raw))?,
    };

    let date = NaiveDate::parse_from_str(field("date"), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", field("date")))?;

    // A frequency with no is_recurring value still marks the row recurring
    let frequency = field("recurring_frequency");
    let is_recurring = parse_flag(field("is_recurring"))?.unwrap_or(!frequency.is_empty());
    let recurrence = Recurrence::from_parts(is_recurring, Frequency::parse(frequency));

    Ok(ImportRow {
        title,
        amount,
        category,
        date,
        recurrence,
    })
}

fn column<'r>(record: &'r StringRecord, columns: &HashMap<String, usize>, name: &str) -> &'r str {
    columns
        .get(name)
        .and_then(|&i| record.get(i))
        .unwrap_or("")
}

fn parse_flag(raw: &str) -> Result<Option<bool>, String> {
    match raw.to_lowercase().as_str() {
        "" => Ok(None),
        "false" | "no" | "n" | "0" => Ok(Some(false)),
        "true" | "yes" | "y" | "1" => Ok(Some(true)),
        other => Err(format!("Invalid is_recurring value: {}", other)),
    }
}
