//! Reports module for the expense tracker
//!
//! Provides the expense table used by the PDF export and the category
//! summary used by the pie chart and terminal breakdown.

pub mod category_summary;
pub mod expense_table;

pub use category_summary::{CategorySlice, CategorySummary};
pub use expense_table::{Alignment, Column, ExpenseTableReport, ReportRow, COLUMNS, COLUMN_COUNT};
