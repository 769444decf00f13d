//! Expense Tracker - personal expense recording with reports
//!
//! This library provides the core functionality for the expense tracker:
//! recording expenses in a local SQLite database, validating input before
//! it is stored, and turning the recorded data into a tabular PDF report
//! and a category pie chart.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses and their ids)
//! - `storage`: SQLite storage layer
//! - `services`: Validation and business logic
//! - `reports`: Table and category summary models
//! - `export`: PDF and SVG renderers
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber
///
/// Honors `RUST_LOG`; without it only warnings from this crate are shown.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_tracker=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
