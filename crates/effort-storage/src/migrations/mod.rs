//! Schema migrations using PRAGMA user_version.

pub mod v001_initial;

use effort_core::errors::PersistenceError;
use rusqlite::Connection;

const MIGRATIONS: &[(&str, u32)] = &[(v001_initial::MIGRATION_SQL, 1)];

/// Schema version a fully migrated registry reports.
pub const LATEST_VERSION: u32 = 1;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), PersistenceError> {
    let current: u32 = current_version(conn)?;

    for (sql, version) in MIGRATIONS {
        if current < *version {
            conn.execute_batch(sql)
                .map_err(|e| PersistenceError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| PersistenceError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, PersistenceError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| PersistenceError::Sqlite {
            message: e.to_string(),
        })
}
