//! Expense service
//!
//! Business logic between a front end and the store: validate then insert,
//! list, look up, delete, and aggregate.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};
use crate::storage::Storage;

use super::validation::{validate, ExpenseInput};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// A fresh entry form: today's date and the first configured options
    pub fn blank_input(&self, today: NaiveDate) -> ExpenseInput {
        ExpenseInput {
            date: today.format("%Y-%m-%d").to_string(),
            mode_of_payment: self.settings.default_payment_mode().unwrap_or_default().to_string(),
            category: self.settings.default_category().unwrap_or_default().to_string(),
            ..ExpenseInput::default()
        }
    }

    /// Validate and store a new expense
    ///
    /// Rejected input never reaches the store.
    pub fn add(&self, input: &ExpenseInput) -> ExpenseResult<Expense> {
        let expense = validate(input, self.settings).map_err(|failure| {
            tracing::debug!(%failure, "rejected expense input");
            ExpenseError::from(failure)
        })?;
        self.storage.expenses().insert(expense)
    }

    /// All expenses, newest first
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses().list_all()
    }

    /// Get an expense by id
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.storage
            .expenses()
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    /// Find an expense by id, `None` when absent
    pub fn find(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses().get(id)
    }

    /// Delete an expense; returns whether anything was removed
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<bool> {
        self.storage.expenses().delete_by_id(id)
    }

    /// Positive per-category totals
    pub fn category_totals(&self) -> ExpenseResult<BTreeMap<String, f64>> {
        self.storage.expenses().aggregate_by_category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, ValidationFailure};

    fn input(date: &str, payee: &str, amount: &str, category: &str) -> ExpenseInput {
        ExpenseInput {
            date: date.into(),
            payee: payee.into(),
            description: "test".into(),
            amount: amount.into(),
            mode_of_payment: "Cash".into(),
            category: category.into(),
        }
    }

    #[test]
    fn test_add_and_list() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let added = service.add(&input("2024-01-10", "Cafe", "4.50", "food")).unwrap();
        assert_eq!(added.category, "Food");

        let listed = service.list().unwrap();
        assert_eq!(listed, vec![added]);
    }

    #[test]
    fn test_invalid_amount_inserts_nothing() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        for amount in ["0", "-12", "twelve"] {
            let err = service
                .add(&input("2024-01-10", "Cafe", amount, "Food"))
                .unwrap_err();
            assert!(matches!(
                err,
                ExpenseError::Validation(ValidationFailure::InvalidAmount(_))
            ));
        }
        assert_eq!(storage.expenses().count().unwrap(), 0);
    }

    #[test]
    fn test_missing_field_inserts_nothing() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let err = service.add(&input("2024-01-10", "", "3", "Food")).unwrap_err();
        assert!(matches!(
            err,
            ExpenseError::Validation(ValidationFailure::MissingField(Field::Payee))
        ));
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_and_delete() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let added = service.add(&input("2024-01-10", "Cafe", "4.50", "Food")).unwrap();
        assert_eq!(service.get(added.id).unwrap(), added);

        assert!(service.delete(added.id).unwrap());
        assert!(service.get(added.id).unwrap_err().is_not_found());
        assert_eq!(service.find(added.id).unwrap(), None);
        assert!(!service.delete(added.id).unwrap());
    }

    #[test]
    fn test_category_totals() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        service.add(&input("2024-01-05", "Landlord", "1200", "Housing")).unwrap();
        service.add(&input("2024-01-10", "Cafe", "4.50", "Food")).unwrap();
        service.add(&input("2024-01-11", "Cafe", "3.00", "Food")).unwrap();

        let totals = service.category_totals().unwrap();
        assert!((totals["Food"] - 7.5).abs() < 1e-9);
        assert!((totals["Housing"] - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_blank_input_uses_first_options() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let blank = service.blank_input(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(blank.date, "2024-06-01");
        assert_eq!(blank.mode_of_payment, "Cash");
        assert_eq!(blank.category, "Food");
        assert!(blank.payee.is_empty());
        assert!(blank.amount.is_empty());
    }
}
