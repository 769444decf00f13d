//! Validation of raw expense input
//!
//! Turns the field values collected by a front end into a [`NewExpense`],
//! or explains which rule rejected them. Nothing here touches the store.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{Field, ValidationFailure};
use crate::models::NewExpense;

/// Raw field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseInput {
    /// Date in `YYYY-MM-DD` form
    pub date: String,
    pub payee: String,
    pub description: String,
    /// Amount as entered, parsed as a decimal number
    pub amount: String,
    pub mode_of_payment: String,
    pub category: String,
}

/// Validate raw input against the configured option lists
///
/// Required fields are checked first, then the amount, then the date.
/// Payment modes and categories matching a configured label (ignoring
/// case) take the configured spelling; other labels are kept as typed.
pub fn validate(input: &ExpenseInput, settings: &Settings) -> Result<NewExpense, ValidationFailure> {
    let date = required(&input.date, Field::Date)?;
    let payee = required(&input.payee, Field::Payee)?;
    let description = required(&input.description, Field::Description)?;
    let mode_of_payment = required(&input.mode_of_payment, Field::ModeOfPayment)?;
    let category = required(&input.category, Field::Category)?;

    let amount = parse_amount(&input.amount)?;
    let date = parse_date(date)?;

    let mode_of_payment = settings
        .find_payment_mode(mode_of_payment)
        .unwrap_or(mode_of_payment)
        .to_string();
    let category = settings
        .find_category(category)
        .unwrap_or(category)
        .to_string();

    Ok(NewExpense {
        date,
        payee: payee.to_string(),
        description: description.to_string(),
        amount,
        mode_of_payment,
        category,
    })
}

/// Parse an amount, accepting only finite values strictly above zero
pub fn parse_amount(raw: &str) -> Result<f64, ValidationFailure> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationFailure::InvalidAmount(trimmed.to_string())),
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationFailure> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationFailure::InvalidDate(trimmed.to_string()))
}

fn required(value: &str, field: Field) -> Result<&str, ValidationFailure> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationFailure::MissingField(field))
    } else {
        Ok(trimmed)
    }
}
