//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and reports for terminal
//! display.

pub mod expense;
pub mod report;

pub use expense::{format_amount, format_expense_details, format_expense_list};
