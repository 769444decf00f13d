//! Path management for the expense tracker
//!
//! The database lives next to the application by default, so a copied
//! install carries its data with it.
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSE_TRACKER_DIR` environment variable (if set)
//! 2. The directory containing the running executable

use std::path::PathBuf;

use crate::error::ExpenseError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DIR";

/// File name of the SQLite database
pub const DATABASE_FILE_NAME: &str = "ExpenseTracker.db";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Base directory for all expense tracker data
    base_dir: PathBuf,
}

impl ExpensePaths {
    /// Create a new ExpensePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the executable location cannot be determined.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ExpensePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the SQLite database
    pub fn database_file(&self) -> PathBuf {
        self.base_dir.join(DATABASE_FILE_NAME)
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default destination for the category chart
    pub fn summary_chart_file(&self) -> PathBuf {
        self.base_dir.join("ExpenseSummary.svg")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if settings have been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the directory of the running executable
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    let exe = std::env::current_exe().map_err(|e| {
        ExpenseError::Config(format!("Could not determine application location: {}", e))
    })?;

    exe.parent()
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| ExpenseError::Config("Application has no parent directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(
            paths.database_file(),
            temp_dir.path().join("ExpenseTracker.db")
        );
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let paths = ExpensePaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();

        assert!(nested.exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_default_path_is_executable_dir() {
        let dir = resolve_default_path().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(Some(dir.as_path()), exe.parent());
    }
}
