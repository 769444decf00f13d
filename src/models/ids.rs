//! Strongly-typed ID wrapper for expense records
//!
//! IDs are assigned by SQLite on insert; callers never mint them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a persisted expense (the `ID` column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Wrap a row id read back from the store
    pub const fn from_row_id(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying row id
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
