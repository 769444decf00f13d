//! Expense CLI commands
//!
//! Implements the record commands: add, list, show and delete.

use chrono::Local;
use clap::Args;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::ExpenseResult;
use crate::models::ExpenseId;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Arguments for adding an expense
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Expense date (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Who was paid
    #[arg(short, long)]
    pub payee: Option<String>,

    /// What the money was spent on
    #[arg(long)]
    pub description: Option<String>,

    /// Amount spent (e.g., "12.50")
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// Payment mode (default: first configured mode)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Category (default: first configured category)
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Handle `add`
pub fn handle_add(storage: &Storage, settings: &Settings, args: AddArgs) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage, settings);

    let mut input = service.blank_input(Local::now().date_naive());
    if let Some(date) = args.date {
        input.date = date;
    }
    // Missing values are left empty so validation reports them in order
    input.payee = args.payee.unwrap_or_default();
    input.description = args.description.unwrap_or_default();
    input.amount = args.amount.unwrap_or_default();
    if let Some(mode) = args.mode {
        input.mode_of_payment = mode;
    }
    if let Some(category) = args.category {
        input.category = category;
    }

    let expense = service.add(&input)?;
    println!("Expense added successfully!");
    println!("  {}", expense);
    Ok(())
}

/// Handle `list`
pub fn handle_list(storage: &Storage, settings: &Settings) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage, settings);
    let expenses = service.list()?;
    print!("{}", format_expense_list(&expenses, settings));
    Ok(())
}

/// Handle `show`
pub fn handle_show(storage: &Storage, settings: &Settings, id: ExpenseId) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage, settings);
    let expense = service.get(id)?;
    print!("{}", format_expense_details(&expense, settings));
    Ok(())
}

/// Handle `delete`
///
/// Without `force` only shows the record and how to confirm.
pub fn handle_delete(
    storage: &Storage,
    settings: &Settings,
    id: ExpenseId,
    force: bool,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage, settings);

    if !force {
        match service.find(id)? {
            Some(expense) => {
                print!("{}", format_expense_details(&expense, settings));
                println!();
                println!("Delete this expense? To proceed, run again with --force flag:");
                println!("  expense-tracker delete {} --force", id);
            }
            None => println!("No expense with ID {}; nothing deleted.", id),
        }
        return Ok(());
    }

    if service.delete(id)? {
        println!("Deleted expense {}", id);
    } else {
        println!("No expense with ID {}; nothing deleted.", id);
    }
    Ok(())
}
