//! CLI command for the category summary
//!
//! Prints the terminal breakdown and saves the pie chart image.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::export::{save_pie_chart, with_default_extension, ChartOutcome};
use crate::reports::CategorySummary;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Handle `summary`
///
/// Returns where the chart went, or `None` when there was nothing to chart.
pub fn handle_summary(
    storage: &Storage,
    settings: &Settings,
    output: &Path,
) -> ExpenseResult<Option<PathBuf>> {
    let service = ExpenseService::new(storage, settings);
    let summary = CategorySummary::from_totals(&service.category_totals()?);

    if summary.is_empty() {
        println!("No expense data found to visualize.");
        return Ok(None);
    }

    print!("{}", summary.format_terminal(&settings.currency_symbol));
    println!();

    let output = with_default_extension(output, "svg");
    match save_pie_chart(&summary, &output)? {
        ChartOutcome::Written { path, .. } => {
            println!("Pie chart saved to: {}", path.display());
            Ok(Some(path))
        }
        ChartOutcome::NothingToVisualize => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn add(storage: &Storage, category: &str, amount: f64) {
        storage
            .expenses()
            .insert(NewExpense {
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                payee: "Shop".into(),
                description: "Item".into(),
                amount,
                mode_of_payment: "Cash".into(),
                category: category.into(),
            })
            .unwrap();
    }

    #[test]
    fn test_summary_writes_chart() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, "Housing", 1200.0);
        add(&storage, "Food", 4.5);

        let path = handle_summary(&storage, &Settings::default(), &temp_dir.path().join("chart"))
            .unwrap()
            .unwrap();
        assert_eq!(path, temp_dir.path().join("chart.svg"));

        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("99.6%"));
        assert!(svg.contains("Housing"));
    }

    #[test]
    fn test_summary_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open_in_memory().unwrap();
        let output = temp_dir.path().join("chart.svg");

        assert!(handle_summary(&storage, &Settings::default(), &output)
            .unwrap()
            .is_none());
        assert!(!output.exists());
    }
}
