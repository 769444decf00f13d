//! Expense model
//!
//! An expense is a single dated payment with a payee, a description, a
//! positive amount, how it was paid, and what it was spent on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;

/// A validated expense that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Day the money was spent
    pub date: NaiveDate,

    /// Who was paid
    pub payee: String,

    /// What the payment was for
    pub description: String,

    /// Amount paid, always strictly positive
    pub amount: f64,

    /// Payment method label (e.g. "Cash", "UPI")
    pub mode_of_payment: String,

    /// Spending category label (e.g. "Food", "Housing")
    pub category: String,
}

/// A persisted expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Identifier assigned by the store
    pub id: ExpenseId,

    pub date: NaiveDate,
    pub payee: String,
    pub description: String,
    pub amount: f64,
    pub mode_of_payment: String,
    pub category: String,
}

impl Expense {
    /// Attach a store-assigned id to a validated expense
    pub fn from_new(id: ExpenseId, new: NewExpense) -> Self {
        Self {
            id,
            date: new.date,
            payee: new.payee,
            description: new.description,
            amount: new.amount,
            mode_of_payment: new.mode_of_payment,
            category: new.category,
        }
    }

    /// Amount formatted to two decimals
    pub fn formatted_amount(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} - {} ({})",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.payee,
            self.description,
            self.formatted_amount()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> NewExpense {
        NewExpense {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            payee: "Cafe".into(),
            description: "Coffee".into(),
            amount: 4.5,
            mode_of_payment: "Cash".into(),
            category: "Food".into(),
        }
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let expense = Expense::from_new(ExpenseId::from_row_id(3), coffee());
        assert_eq!(expense.id.as_i64(), 3);
        assert_eq!(expense.payee, "Cafe");
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.formatted_amount(), "4.50");
    }

    #[test]
    fn test_display() {
        let expense = Expense::from_new(ExpenseId::from_row_id(3), coffee());
        assert_eq!(expense.to_string(), "#3 2024-01-10 Cafe - Coffee (4.50)");
    }
}
