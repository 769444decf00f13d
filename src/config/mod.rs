//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence (option lists, display preferences)

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
