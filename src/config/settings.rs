//! User settings for the expense tracker
//!
//! Holds the configurable option lists (payment modes and spending
//! categories) along with display preferences.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::storage::file_io::write_json_atomic;

/// Payment modes offered out of the box
pub const DEFAULT_PAYMENT_MODES: &[&str] = &[
    "Cash",
    "Credit Card",
    "Debit Card",
    "Net Banking",
    "UPI",
    "Others",
];

/// Spending categories offered out of the box
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Groceries",
    "Bills",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Housing",
    "Health",
    "Education",
    "Others",
];

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Payment mode labels, first entry is the default
    #[serde(default = "default_payment_modes")]
    pub payment_modes: Vec<String>,

    /// Category labels, first entry is the default
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Currency symbol shown before amounts in terminal output
    #[serde(default)]
    pub currency_symbol: String,

    /// Date format preference (strftime format) for terminal output
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_payment_modes() -> Vec<String> {
    DEFAULT_PAYMENT_MODES.iter().map(|s| s.to_string()).collect()
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            payment_modes: default_payment_modes(),
            categories: default_categories(),
            currency_symbol: String::new(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            tracing::debug!(path = %settings_path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        tracing::debug!(path = %settings_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Check values that would otherwise fail later during formatting
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ExpenseError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Default payment mode for a fresh entry form
    pub fn default_payment_mode(&self) -> Option<&str> {
        self.payment_modes.first().map(String::as_str)
    }

    /// Default category for a fresh entry form
    pub fn default_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    /// Find the configured spelling of a payment mode (case-insensitive)
    pub fn find_payment_mode(&self, label: &str) -> Option<&str> {
        find_label(&self.payment_modes, label)
    }

    /// Find the configured spelling of a category (case-insensitive)
    pub fn find_category(&self, label: &str) -> Option<&str> {
        find_label(&self.categories, label)
    }
}

fn find_label<'a>(options: &'a [String], label: &str) -> Option<&'a str> {
    let label = label.trim();
    options
        .iter()
        .find(|opt| opt.eq_ignore_ascii_case(label))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.payment_modes.len(), 6);
        assert_eq!(settings.categories.len(), 10);
        assert_eq!(settings.default_payment_mode(), Some("Cash"));
        assert_eq!(settings.default_category(), Some("Food"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.categories.push("Travel".into());
        settings.currency_symbol = "€".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.find_category("travel"), Some("Travel"));
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "$"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.default_payment_mode(), Some("Cash"));
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_invalid_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Y-%m-%"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_find_label_case_insensitive() {
        let settings = Settings::default();
        assert_eq!(settings.find_payment_mode("net banking"), Some("Net Banking"));
        assert_eq!(settings.find_payment_mode(" upi "), Some("UPI"));
        assert_eq!(settings.find_payment_mode("Cheque"), None);
    }
}
