//! Read-only registry connections, opened against a migrated database.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use effort_core::errors::PersistenceError;
use rusqlite::{Connection, OpenFlags};

use super::pragmas::ConnectionRole;
use crate::migrations;

const MAX_READERS: usize = 8;

/// Registry readers. Each one sees committed writer transactions only, so a
/// save is observed either entirely or not at all.
pub struct ReadPool {
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `count` readers (clamped to `1..=8`). The writer must already
    /// have migrated the file; a reader that sees an older schema fails.
    pub fn open(path: &Path, count: usize) -> Result<Self, PersistenceError> {
        let readers = (0..count.clamp(1, MAX_READERS))
            .map(|_| open_reader(path).map(Mutex::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            readers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on an idle reader, starting from the next slot in turn.
    /// Waits on that slot when every reader is busy.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&Connection) -> Result<T, PersistenceError>,
    {
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);
        let n = self.readers.len();
        let idle = (0..n).find_map(|offset| self.readers[(start + offset) % n].try_lock().ok());
        let guard = match idle {
            Some(guard) => guard,
            None => lock(&self.readers[start % n])?,
        };
        f(&guard)
    }

    pub fn size(&self) -> usize {
        self.readers.len()
    }
}

fn open_reader(path: &Path) -> Result<Connection, PersistenceError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| PersistenceError::Sqlite {
        message: format!("cannot open registry reader on {}: {e}", path.display()),
    })?;
    ConnectionRole::Reader.configure(&conn)?;
    let version = migrations::current_version(&conn)?;
    if version != migrations::LATEST_VERSION {
        return Err(PersistenceError::MigrationFailed {
            version: migrations::LATEST_VERSION,
            message: format!("reader sees schema version {version}"),
        });
    }
    Ok(conn)
}

fn lock(slot: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, PersistenceError> {
    slot.lock().map_err(|_| PersistenceError::Sqlite {
        message: "registry reader lock poisoned".to_string(),
    })
}
