//! Queries for the models and model_versions tables.

use chrono::{DateTime, Utc};
use effort_core::errors::PersistenceError;
use effort_core::models::{ModelVersion, NewRegistryEntry, RegistryEntry, RegistryStats, StoredArtifact};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTRY_COLUMNS: &str = "id, model_name, model_type, file_path, artifact_hash, created_at,
     updated_at, metrics, feature_count, training_samples, effort_limit, is_active";

fn sqlite_err(e: rusqlite::Error) -> PersistenceError {
    PersistenceError::Sqlite {
        message: e.to_string(),
    }
}

/// Deactivate every entry, then upsert `entry` as the single active model
/// and append a version row. Run inside a transaction.
pub fn insert_active(
    conn: &Connection,
    entry: &NewRegistryEntry,
    artifact: &StoredArtifact,
) -> Result<i64, PersistenceError> {
    let metrics = serde_json::to_string(&entry.metrics).map_err(|e| PersistenceError::Sqlite {
        message: format!("metrics serialization: {e}"),
    })?;

    conn.execute("UPDATE models SET is_active = 0 WHERE is_active = 1", [])
        .map_err(sqlite_err)?;

    conn.execute(
        "INSERT INTO models (model_name, model_type, file_path, artifact_hash, metrics,
                             feature_count, training_samples, effort_limit, is_active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)
         ON CONFLICT(model_name) DO UPDATE SET
            model_type = excluded.model_type,
            file_path = excluded.file_path,
            artifact_hash = excluded.artifact_hash,
            metrics = excluded.metrics,
            feature_count = excluded.feature_count,
            training_samples = excluded.training_samples,
            effort_limit = excluded.effort_limit,
            is_active = 1,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            entry.model_name,
            entry.model_type,
            artifact.file_path,
            artifact.hash,
            metrics,
            entry.feature_count as i64,
            entry.training_samples as i64,
            entry.effort_limit,
        ],
    )
    .map_err(sqlite_err)?;

    let id: i64 = conn
        .query_row(
            "SELECT id FROM models WHERE model_name = ?1",
            params![entry.model_name],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;

    let previous: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM model_versions WHERE model_id = ?1",
            params![id],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;

    conn.execute(
        "INSERT INTO model_versions (model_id, version, file_path, metrics)
         VALUES (?1, ?2, ?3, ?4)",
        params![id, format!("v{}", previous + 1), artifact.file_path, metrics],
    )
    .map_err(sqlite_err)?;

    Ok(id)
}

/// Most recently updated active entry; ties go to the highest id.
pub fn get_active(conn: &Connection) -> Result<Option<RegistryEntry>, PersistenceError> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM models WHERE is_active = 1
         ORDER BY updated_at DESC, id DESC LIMIT 1"
    );
    conn.query_row(&sql, [], map_entry)
        .optional()
        .map_err(sqlite_err)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<RegistryEntry>, PersistenceError> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM models WHERE id = ?1");
    conn.query_row(&sql, params![id], map_entry)
        .optional()
        .map_err(sqlite_err)
}

pub fn list_all(conn: &Connection) -> Result<Vec<RegistryEntry>, PersistenceError> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM models ORDER BY updated_at DESC, id DESC");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let rows = stmt.query_map([], map_entry).map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Delete an entry and its version rows. Returns whether a row was removed.
/// Active status is never moved to another entry.
pub fn delete(conn: &Connection, id: i64) -> Result<bool, PersistenceError> {
    conn.execute("DELETE FROM model_versions WHERE model_id = ?1", params![id])
        .map_err(sqlite_err)?;
    let removed = conn
        .execute("DELETE FROM models WHERE id = ?1", params![id])
        .map_err(sqlite_err)?;
    Ok(removed > 0)
}

pub fn stats(conn: &Connection) -> Result<RegistryStats, PersistenceError> {
    let (total, active): (i64, i64) = conn
        .query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_active), 0) FROM models",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(sqlite_err)?;

    let latest = conn
        .query_row(
            "SELECT model_type, updated_at FROM models ORDER BY updated_at DESC, id DESC LIMIT 1",
            [],
            |row| {
                let model_type: String = row.get(0)?;
                let updated_at = parse_timestamp(1, row.get(1)?)?;
                Ok((model_type, updated_at))
            },
        )
        .optional()
        .map_err(sqlite_err)?;

    let (latest_type, latest_update) = match latest {
        Some((t, u)) => (Some(t), Some(u)),
        None => (None, None),
    };
    Ok(RegistryStats {
        total_count: total as usize,
        active_count: active as usize,
        latest_type,
        latest_update,
    })
}

/// Version rows for one model, oldest first.
pub fn versions(conn: &Connection, model_id: i64) -> Result<Vec<ModelVersion>, PersistenceError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, model_id, version, file_path, created_at, metrics
             FROM model_versions WHERE model_id = ?1 ORDER BY id ASC",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![model_id], |row| {
            Ok(ModelVersion {
                id: row.get(0)?,
                model_id: row.get(1)?,
                version: row.get(2)?,
                file_path: row.get(3)?,
                created_at: parse_timestamp(4, row.get(4)?)?,
                metrics: parse_metrics(5, row.get(5)?)?,
            })
        })
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

fn map_entry(row: &Row<'_>) -> rusqlite::Result<RegistryEntry> {
    Ok(RegistryEntry {
        id: row.get(0)?,
        model_name: row.get(1)?,
        model_type: row.get(2)?,
        file_path: row.get(3)?,
        artifact_hash: row.get(4)?,
        created_at: parse_timestamp(5, row.get(5)?)?,
        updated_at: parse_timestamp(6, row.get(6)?)?,
        metrics: parse_metrics(7, row.get(7)?)?,
        feature_count: row.get::<_, i64>(8)? as usize,
        training_samples: row.get::<_, i64>(9)? as usize,
        effort_limit: row.get(10)?,
        is_active: row.get::<_, i64>(11)? != 0,
    })
}

fn parse_timestamp(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_metrics(idx: usize, raw: String) -> rusqlite::Result<serde_json::Value> {
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
