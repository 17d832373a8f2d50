//! Write connection utilities: BEGIN IMMEDIATE transactions.

use effort_core::errors::PersistenceError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// The write lock is taken up front; the transaction rolls back when `f` fails.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, PersistenceError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, PersistenceError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(|e| {
        PersistenceError::Sqlite {
            message: format!("failed to begin immediate transaction: {e}"),
        }
    })?;

    let result = f(&tx)?;

    tx.commit().map_err(|e| PersistenceError::Sqlite {
        message: format!("failed to commit: {e}"),
    })?;

    Ok(result)
}
