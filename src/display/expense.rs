//! Expense display formatting
//!
//! Renders the expense list as a terminal table and single expenses as a
//! detail block.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Expense;

use super::report::truncate;

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Payee")]
    payee: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Payment Mode")]
    mode_of_payment: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, settings: &Settings) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.format(&settings.date_format).to_string(),
            payee: expense.payee.clone(),
            description: truncate(&expense.description, DESCRIPTION_WIDTH),
            amount: format_amount(expense.amount, settings),
            mode_of_payment: expense.mode_of_payment.clone(),
            category: expense.category.clone(),
        }
    }
}

/// Format an amount with the configured currency symbol
pub fn format_amount(amount: f64, settings: &Settings) -> String {
    format!("{}{:.2}", settings.currency_symbol, amount)
}

/// Format the expense list as a table, keeping the given order
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow::new(e, settings));
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(4), Alignment::right());

    format!("{}\n", table)
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:      {}\n", expense.id));
    output.push_str(&format!(
        "Date:         {}\n",
        expense.date.format(&settings.date_format)
    ));
    output.push_str(&format!("Payee:        {}\n", expense.payee));
    output.push_str(&format!("Description:  {}\n", expense.description));
    output.push_str(&format!(
        "Amount:       {}\n",
        format_amount(expense.amount, settings)
    ));
    output.push_str(&format!("Payment Mode: {}\n", expense.mode_of_payment));
    output.push_str(&format!("Category:     {}\n", expense.category));

    output
}
