//! Expense repository for SQLite storage
//!
//! Thin wrapper over the `ExpenseTracker` table. Callers validate input
//! before it gets here; the repository only persists and queries.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, NewExpense};

const SELECT_COLUMNS: &str =
    "SELECT ID, Date, Payee, Description, Amount, ModeOfPayment, Category FROM ExpenseTracker";

/// Repository for expense persistence
pub struct ExpenseRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ExpenseRepository<'a> {
    /// Create a repository over an open connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new expense and return it with its assigned id
    pub fn insert(&self, expense: NewExpense) -> ExpenseResult<Expense> {
        self.conn
            .execute(
                "INSERT INTO ExpenseTracker (Date, Payee, Description, Amount, ModeOfPayment, Category)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    expense.date,
                    expense.payee,
                    expense.description,
                    expense.amount,
                    expense.mode_of_payment,
                    expense.category
                ],
            )
            .map_err(|e| ExpenseError::StorageWrite(format!("Could not add expense: {}", e)))?;

        let id = ExpenseId::from_row_id(self.conn.last_insert_rowid());
        tracing::info!(%id, category = %expense.category, "inserted expense");

        Ok(Expense::from_new(id, expense))
    }

    /// Get every expense, newest date first, ties broken by newest id
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        let sql = format!("{} ORDER BY Date DESC, ID DESC", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql).map_err(read_error)?;

        let expenses = stmt
            .query_map([], row_to_expense)
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;

        Ok(expenses)
    }

    /// Get an expense by id
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let sql = format!("{} WHERE ID = ?1", SELECT_COLUMNS);
        self.conn
            .query_row(&sql, params![id.as_i64()], row_to_expense)
            .optional()
            .map_err(read_error)
    }

    /// Delete an expense by id
    ///
    /// Returns whether a row was removed. Deleting an absent id is not an
    /// error.
    pub fn delete_by_id(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM ExpenseTracker WHERE ID = ?1", params![id.as_i64()])
            .map_err(|e| ExpenseError::StorageWrite(format!("Could not delete expense: {}", e)))?;

        if affected == 0 {
            tracing::debug!(%id, "delete matched no expense");
        } else {
            tracing::info!(%id, "deleted expense");
        }
        Ok(affected > 0)
    }

    /// Sum of amounts per category, keeping only strictly positive sums
    pub fn aggregate_by_category(&self) -> ExpenseResult<BTreeMap<String, f64>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT Category, SUM(Amount) FROM ExpenseTracker
                 GROUP BY Category HAVING SUM(Amount) > 0",
            )
            .map_err(read_error)?;

        let totals = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))
            .map_err(read_error)?
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map_err(read_error)?;

        tracing::debug!(categories = totals.len(), "aggregated expenses by category");
        Ok(totals)
    }

    /// Number of stored expenses
    pub fn count(&self) -> ExpenseResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM ExpenseTracker", [], |row| row.get(0))
            .map_err(read_error)?;
        Ok(count as usize)
    }
}

fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: ExpenseId::from_row_id(row.get(0)?),
        date: row.get(1)?,
        payee: row.get(2)?,
        description: row.get(3)?,
        amount: row.get(4)?,
        mode_of_payment: row.get(5)?,
        category: row.get(6)?,
    })
}

fn read_error(e: rusqlite::Error) -> ExpenseError {
    ExpenseError::StorageRead(format!("Could not fetch expenses: {}", e))
}
