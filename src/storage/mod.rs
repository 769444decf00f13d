//! Storage layer for the expense tracker
//!
//! Owns the single SQLite connection for the lifetime of the application.
//! Every operation is one statement, committed on its own.

pub mod expenses;
pub mod file_io;
pub mod schema;

pub use expenses::ExpenseRepository;
pub use file_io::{write_bytes_atomic, write_json_atomic};

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};

/// Main storage handle that provides access to the expense table
pub struct Storage {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Storage {
    /// Open (creating if absent) the database under the configured paths
    pub fn open(paths: &ExpensePaths) -> ExpenseResult<Self> {
        paths
            .ensure_directories()
            .map_err(|e| ExpenseError::StorageUnavailable(e.to_string()))?;
        Self::open_at(paths.database_file())
    }

    /// Open (creating if absent) the database at an explicit path
    pub fn open_at(path: impl AsRef<Path>) -> ExpenseResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            ExpenseError::StorageUnavailable(format!(
                "Could not open database {}: {}",
                path.display(),
                e
            ))
        })?;

        let existed = schema::table_exists(&conn)
            .map_err(|e| ExpenseError::StorageUnavailable(e.to_string()))?;
        schema::create_schema(&conn)?;
        if existed {
            tracing::info!(path = %path.display(), "opened expense database");
        } else {
            tracing::info!(path = %path.display(), "created expense database");
        }

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> ExpenseResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ExpenseError::StorageUnavailable(e.to_string()))?;
        schema::create_schema(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Path of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Access the expense table
    pub fn expenses(&self) -> ExpenseRepository<'_> {
        ExpenseRepository::new(&self.conn)
    }

    /// Release the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> ExpenseResult<()> {
        self.conn.close().map_err(|(_, e)| {
            ExpenseError::StorageWrite(format!("Failed to close database: {}", e))
        })?;
        tracing::debug!("closed expense database");
        Ok(())
    }
}
