//! Path management for the budget planner
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_PLANNER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (e.g. `~/.config/budget-planner` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::PlannerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUDGET_PLANNER_DATA_DIR";

/// Manages all paths used by the budget planner
#[derive(Debug, Clone)]
pub struct PlannerPaths {
    base_dir: PathBuf,
}

impl PlannerPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PlannerError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "budget-planner")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    PlannerError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn savings_file(&self) -> PathBuf {
        self.data_dir().join("savings.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PlannerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PlannerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PlannerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether `init` has been run here (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
