//! User settings for the budget planner
//!
//! Display and default-value preferences. Settings are loaded once and passed
//! by reference to whatever needs them.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::error::PlannerError;
use crate::models::{BudgetPeriod, ExpenseCategory, DEFAULT_ALERT_THRESHOLD};

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Category given to new expenses when none is specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_category: Option<ExpenseCategory>,

    /// Period given to new budgets when none is specified
    #[serde(default)]
    pub default_budget_period: BudgetPeriod,

    /// Alert threshold given to new budgets when none is specified
    #[serde(default = "default_alert_threshold")]
    pub default_alert_threshold: u8,

    /// Round displayed budget suggestions up to the next ten
    #[serde(default = "default_true")]
    pub round_suggestions: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_alert_threshold() -> u8 {
    DEFAULT_ALERT_THRESHOLD
}

fn default_true() -> bool {
    true
}

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_date_format() -> String {
    ISO_DATE_FORMAT.to_string()
}

fn is_valid_date_format(pattern: &str) -> bool {
    !pattern.is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_category: None,
            default_budget_period: BudgetPeriod::default(),
            default_alert_threshold: default_alert_threshold(),
            round_suggestions: true,
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &PlannerPaths) -> Result<Self, PlannerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not saved until the caller decides to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PlannerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| PlannerError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the display layer cannot use
    pub fn validate(&self) -> Result<(), PlannerError> {
        if !is_valid_date_format(&self.date_format) {
            return Err(PlannerError::Config(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Format a date with the configured pattern, falling back to ISO dates
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut output = String::new();
        if write!(output, "{}", date.format(&self.date_format)).is_err() {
            output.clear();
            output.push_str(&date.format(ISO_DATE_FORMAT).to_string());
        }
        output
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PlannerPaths) -> Result<(), PlannerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PlannerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PlannerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Category for a new expense: the given one, else the configured default
    pub fn category_or_default(&self, category: Option<ExpenseCategory>) -> ExpenseCategory {
        category.or(self.default_category).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_alert_threshold, 80);
        assert_eq!(settings.default_budget_period, BudgetPeriod::Monthly);
        assert!(settings.round_suggestions);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "€".into(),
            default_category: Some(ExpenseCategory::Food),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_category, Some(ExpenseCategory::Food));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.default_alert_threshold, 80);
        assert!(loaded.round_suggestions);
    }

    #[test]
    fn test_invalid_date_format_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let mut settings = Settings::default();
        assert_eq!(settings.format_date(date), "2025-03-09");

        settings.date_format = "%d/%m/%Y".into();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.format_date(date), "09/03/2025");

        settings.date_format = "%Q".into();
        assert!(settings.validate().is_err());
        assert_eq!(settings.format_date(date), "2025-03-09");
    }

    #[test]
    fn test_category_or_default() {
        let mut settings = Settings::default();
        assert_eq!(settings.category_or_default(None), ExpenseCategory::Other);

        settings.default_category = Some(ExpenseCategory::Transport);
        assert_eq!(settings.category_or_default(None), ExpenseCategory::Transport);
        assert_eq!(
            settings.category_or_default(Some(ExpenseCategory::Food)),
            ExpenseCategory::Food
        );
    }
}
