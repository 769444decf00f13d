//! Storage initialization
//!
//! Creates the `ExpenseTracker` table on first run.

use rusqlite::Connection;

use crate::error::ExpenseError;

/// Name of the single expense table
pub const TABLE_NAME: &str = "ExpenseTracker";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS ExpenseTracker (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Date TEXT NOT NULL,
    Payee TEXT NOT NULL,
    Description TEXT NOT NULL,
    Amount REAL NOT NULL,
    ModeOfPayment TEXT NOT NULL,
    Category TEXT NOT NULL
)";

/// Create the expense table if it does not exist yet
pub fn create_schema(conn: &Connection) -> Result<(), ExpenseError> {
    conn.execute_batch(CREATE_TABLE_SQL).map_err(|e| {
        ExpenseError::StorageUnavailable(format!("Could not create {} table: {}", TABLE_NAME, e))
    })
}

/// Check whether the expense table exists
pub fn table_exists(conn: &Connection) -> Result<bool, ExpenseError> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [TABLE_NAME],
            |row| row.get(0),
        )
        .map_err(|e| ExpenseError::StorageRead(e.to_string()))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_schema_twice() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!table_exists(&conn).unwrap());

        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();

        assert!(table_exists(&conn).unwrap());
    }

    #[test]
    fn test_schema_columns() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM pragma_table_info('ExpenseTracker') ORDER BY cid")
            .unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            columns,
            vec![
                "ID",
                "Date",
                "Payee",
                "Description",
                "Amount",
                "ModeOfPayment",
                "Category"
            ]
        );
    }
}
