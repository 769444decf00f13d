//! CLI command for PDF export

use std::path::{Path, PathBuf};

use crate::error::ExpenseResult;
use crate::export::{export_expenses_pdf, with_default_extension, ExportOutcome};
use crate::storage::Storage;

/// Handle `export`
///
/// Returns where the file went, or `None` when there was nothing to export.
pub fn handle_export(storage: &Storage, output: &Path) -> ExpenseResult<Option<PathBuf>> {
    let output = with_default_extension(output, "pdf");
    let expenses = storage.expenses().list_all()?;

    match export_expenses_pdf(&expenses, &output)? {
        ExportOutcome::Written {
            path,
            rows,
            pages,
            substituted,
        } => {
            println!(
                "Exported {} expenses ({} page{}) to: {}",
                rows,
                pages,
                if pages == 1 { "" } else { "s" },
                path.display()
            );
            if substituted > 0 {
                println!(
                    "Note: {} character(s) the PDF font cannot show were replaced with '?'",
                    substituted
                );
            }
            Ok(Some(path))
        }
        ExportOutcome::NothingToExport => {
            println!("No expense data found to export.");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_export_appends_extension() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open_in_memory().unwrap();
        storage
            .expenses()
            .insert(NewExpense {
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                payee: "Cafe".into(),
                description: "Coffee".into(),
                amount: 4.5,
                mode_of_payment: "Cash".into(),
                category: "Food".into(),
            })
            .unwrap();

        let written = handle_export(&storage, &temp_dir.path().join("report"))
            .unwrap()
            .unwrap();
        assert_eq!(written, temp_dir.path().join("report.pdf"));
        assert!(written.exists());
    }

    #[test]
    fn test_export_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open_in_memory().unwrap();

        let written = handle_export(&storage, &temp_dir.path().join("report.pdf")).unwrap();
        assert!(written.is_none());
        assert!(!temp_dir.path().join("report.pdf").exists());
    }
}
