//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod report;

pub use expense::{handle_add, handle_delete, handle_list, handle_show, AddArgs};
pub use export::handle_export;
pub use report::handle_summary;
