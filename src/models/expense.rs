//! Expense model
//!
//! A single spend record. Recurring expenses carry the cadence they repeat
//! at so budgets with a different period can normalize them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::frequency::{lenient_frequency, Frequency, Recurrence};
use super::ids::ExpenseId;
use super::money::Money;

/// An expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    pub title: String,

    /// Always positive; validated on create/update
    pub amount: Money,

    #[serde(default)]
    pub category: ExpenseCategory,

    pub date: NaiveDate,

    #[serde(default)]
    pub is_recurring: bool,

    /// Present when `is_recurring` is set; unknown values load as `None`
    #[serde(
        default,
        deserialize_with = "lenient_frequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurring_frequency: Option<Frequency>,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a one-off expense
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            amount,
            category,
            date,
            is_recurring: false,
            recurring_frequency: None,
            created_at: Utc::now(),
        }
    }

    /// Create an expense that repeats at `frequency`
    pub fn recurring(
        title: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
        date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        let mut expense = Self::new(title, amount, category, date);
        expense.set_recurrence(Recurrence::Recurring(frequency));
        expense
    }

    /// How this expense repeats
    pub fn recurrence(&self) -> Recurrence {
        Recurrence::from_parts(self.is_recurring, self.recurring_frequency)
    }

    /// Set the recurrence, keeping the flag and frequency in step
    pub fn set_recurrence(&mut self, recurrence: Recurrence) {
        self.is_recurring = recurrence.is_recurring();
        self.recurring_frequency = recurrence.frequency();
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.amount, self.recurrence())
    }
}

/// Partial update for an expense; only `Some` fields are applied
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<ExpenseCategory>,
    pub date: Option<NaiveDate>,
    pub recurrence: Option<Recurrence>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.recurrence.is_none()
    }

    /// Merge the present fields into `expense`
    pub fn apply(&self, expense: &mut Expense) {
        if let Some(title) = &self.title {
            expense.title = title.trim().to_string();
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(recurrence) = self.recurrence {
            expense.set_recurrence(recurrence);
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    NonPositiveAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
