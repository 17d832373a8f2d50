//! Per-role connection settings for the registry database.

use effort_core::errors::PersistenceError;
use rusqlite::Connection;

/// Busy timeout shared by both roles, in milliseconds.
const BUSY_TIMEOUT_MS: u32 = 5000;

/// What a connection is used for. The writer owns WAL setup; readers are
/// locked to queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRole {
    Writer,
    Reader,
}

impl ConnectionRole {
    fn settings(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Writer => &[
                ("journal_mode", "WAL"),
                ("synchronous", "NORMAL"),
                ("foreign_keys", "ON"),
                ("temp_store", "MEMORY"),
            ],
            Self::Reader => &[("query_only", "ON"), ("temp_store", "MEMORY")],
        }
    }

    /// Apply this role's settings to `conn`.
    pub fn configure(self, conn: &Connection) -> Result<(), PersistenceError> {
        conn.busy_timeout(std::time::Duration::from_millis(u64::from(BUSY_TIMEOUT_MS)))
            .map_err(|e| pragma_error(self, "busy_timeout", e))?;
        for &(name, value) in self.settings() {
            // journal_mode answers with a row, the others with none.
            conn.pragma_update_and_check(None, name, value, |_| Ok(()))
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(()),
                    other => Err(other),
                })
                .map_err(|e| pragma_error(self, name, e))?;
        }
        if self == Self::Reader && !query_only(conn)? {
            return Err(PersistenceError::Sqlite {
                message: "reader connection accepted writes after query_only".to_string(),
            });
        }
        Ok(())
    }
}

fn query_only(conn: &Connection) -> Result<bool, PersistenceError> {
    conn.pragma_query_value(None, "query_only", |row| row.get::<_, i64>(0))
        .map(|v| v != 0)
        .map_err(|e| PersistenceError::Sqlite {
            message: e.to_string(),
        })
}

fn pragma_error(role: ConnectionRole, name: &str, e: rusqlite::Error) -> PersistenceError {
    PersistenceError::Sqlite {
        message: format!("{role:?} connection rejected {name}: {e}"),
    }
}
