//! Expense table report
//!
//! The tabular layout shared by every renderer: six fixed columns with
//! width ratios and alignment, and one row of formatted cells per expense.

use crate::models::Expense;

/// Horizontal alignment of a column's cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    Right,
}

/// A fixed report column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Header text
    pub title: &'static str,
    /// Share of the usable document width
    pub width_ratio: f32,
    pub align: Alignment,
    /// Free-text column whose cells may be cut with an ellipsis; other
    /// cells are always shown whole
    pub truncate: bool,
}

/// Number of report columns
pub const COLUMN_COUNT: usize = 6;

/// Report columns, in output order
pub const COLUMNS: [Column; COLUMN_COUNT] = [
    Column {
        title: "Date",
        width_ratio: 0.12,
        align: Alignment::Center,
        truncate: false,
    },
    Column {
        title: "Payee",
        width_ratio: 0.15,
        align: Alignment::Center,
        truncate: true,
    },
    Column {
        title: "Description",
        width_ratio: 0.25,
        align: Alignment::Center,
        truncate: true,
    },
    Column {
        title: "Amount",
        width_ratio: 0.10,
        align: Alignment::Right,
        truncate: false,
    },
    Column {
        title: "Payment Mode",
        width_ratio: 0.18,
        align: Alignment::Center,
        truncate: false,
    },
    Column {
        title: "Category",
        width_ratio: 0.18,
        align: Alignment::Center,
        truncate: false,
    },
];

/// One formatted body row
pub type ReportRow = [String; COLUMN_COUNT];

/// Expense table ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseTableReport {
    /// Body rows, in the order the expenses were given
    pub rows: Vec<ReportRow>,
}

impl ExpenseTableReport {
    /// Build the table from expenses, keeping their order
    pub fn generate(expenses: &[Expense]) -> Self {
        let rows = expenses
            .iter()
            .map(|e| {
                [
                    e.date.format("%Y-%m-%d").to_string(),
                    e.payee.clone(),
                    e.description.clone(),
                    e.formatted_amount(),
                    e.mode_of_payment.clone(),
                    e.category.clone(),
                ]
            })
            .collect();

        Self { rows }
    }

    /// Header cells
    pub fn header() -> [&'static str; COLUMN_COUNT] {
        COLUMNS.map(|c| c.title)
    }

    /// Whether there is nothing to render
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Body rows plus the header row
    pub fn total_rows(&self) -> usize {
        self.rows.len() + 1
    }

    /// Absolute column widths for a given usable width
    pub fn column_widths(total_width: f32) -> [f32; COLUMN_COUNT] {
        COLUMNS.map(|c| c.width_ratio * total_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewExpense};
    use chrono::NaiveDate;

    fn expense(id: i64, day: u32, payee: &str, amount: f64) -> Expense {
        Expense::from_new(
            ExpenseId::from_row_id(id),
            NewExpense {
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                payee: payee.into(),
                description: "desc".into(),
                amount,
                mode_of_payment: "UPI".into(),
                category: "Bills".into(),
            },
        )
    }

    #[test]
    fn test_header_order() {
        assert_eq!(
            ExpenseTableReport::header(),
            ["Date", "Payee", "Description", "Amount", "Payment Mode", "Category"]
        );
    }

    #[test]
    fn test_column_width_ratios() {
        let total: f32 = COLUMNS.iter().map(|c| c.width_ratio).sum();
        assert!((total - 0.98).abs() < 1e-5);

        let widths = ExpenseTableReport::column_widths(100.0);
        assert!((widths[2] - 25.0).abs() < 1e-4);
        assert!((widths[3] - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_only_amount_is_right_aligned() {
        for (i, column) in COLUMNS.iter().enumerate() {
            let expected = if i == 3 {
                Alignment::Right
            } else {
                Alignment::Center
            };
            assert_eq!(column.align, expected, "column {}", column.title);
        }
    }

    #[test]
    fn test_only_free_text_columns_truncate() {
        let truncating: Vec<_> = COLUMNS
            .iter()
            .filter(|c| c.truncate)
            .map(|c| c.title)
            .collect();
        assert_eq!(truncating, vec!["Payee", "Description"]);
    }

    #[test]
    fn test_one_row_per_expense_in_input_order() {
        let expenses = vec![
            expense(3, 20, "Third", 3.0),
            expense(1, 25, "First", 1200.0),
            expense(2, 1, "Second", 0.5),
        ];

        let report = ExpenseTableReport::generate(&expenses);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.total_rows(), 4);

        assert_eq!(
            report.rows[0],
            [
                "2024-01-20".to_string(),
                "Third".to_string(),
                "desc".to_string(),
                "3.00".to_string(),
                "UPI".to_string(),
                "Bills".to_string()
            ]
        );
        assert_eq!(report.rows[1][1], "First");
        assert_eq!(report.rows[1][3], "1200.00");
        assert_eq!(report.rows[2][3], "0.50");
    }

    #[test]
    fn test_empty() {
        let report = ExpenseTableReport::generate(&[]);
        assert!(report.is_empty());
        assert_eq!(report.total_rows(), 1);
    }
}
