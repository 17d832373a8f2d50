//! RegistryEngine: owns the DatabaseManager and implements IModelRegistry.

use std::path::Path;

use effort_core::config::StorageConfig;
use effort_core::errors::EffortResult;
use effort_core::models::{ModelVersion, NewRegistryEntry, RegistryEntry, RegistryStats, StoredArtifact};
use effort_core::traits::IModelRegistry;
use effort_observability::registry_span;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::models;

pub struct RegistryEngine {
    db: DatabaseManager,
}

impl RegistryEngine {
    /// Open a registry backed by a file on disk.
    pub fn open(path: &Path, read_pool_size: usize) -> EffortResult<Self> {
        let db = DatabaseManager::open(path, read_pool_size)?;
        Ok(Self { db })
    }

    pub fn from_config(config: &StorageConfig) -> EffortResult<Self> {
        Self::open(Path::new(&config.db_path), config.read_pool_size)
    }

    /// Open an in-memory registry (for testing).
    pub fn open_in_memory() -> EffortResult<Self> {
        let db = DatabaseManager::open_in_memory()?;
        Ok(Self { db })
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }
}

impl IModelRegistry for RegistryEngine {
    fn save(&self, entry: &NewRegistryEntry, artifact: &StoredArtifact) -> EffortResult<i64> {
        let _span = registry_span!("save").entered();
        let id = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| models::insert_active(tx, entry, artifact))
        })?;
        Ok(id)
    }

    fn get_active(&self) -> EffortResult<Option<RegistryEntry>> {
        Ok(self.db.with_reader(models::get_active)?)
    }

    fn get(&self, id: i64) -> EffortResult<Option<RegistryEntry>> {
        Ok(self.db.with_reader(|conn| models::get(conn, id))?)
    }

    fn list_all(&self) -> EffortResult<Vec<RegistryEntry>> {
        Ok(self.db.with_reader(models::list_all)?)
    }

    fn delete(&self, id: i64) -> EffortResult<bool> {
        let _span = registry_span!("delete").entered();
        let removed = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| models::delete(tx, id))
        })?;
        Ok(removed)
    }

    fn stats(&self) -> EffortResult<RegistryStats> {
        Ok(self.db.with_reader(models::stats)?)
    }

    fn versions(&self, model_id: i64) -> EffortResult<Vec<ModelVersion>> {
        Ok(self.db.with_reader(|conn| models::versions(conn, model_id))?)
    }
}
