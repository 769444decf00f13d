//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation before anything is written.

pub mod expense;
pub mod validation;

pub use expense::ExpenseService;
pub use validation::{validate, ExpenseInput};
