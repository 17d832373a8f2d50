use crate::errors::EffortResult;
use crate::models::{ModelVersion, NewRegistryEntry, RegistryEntry, RegistryStats, StoredArtifact};

/// Durable model metadata with at most one active entry.
pub trait IModelRegistry: Send + Sync {
    /// Register `artifact` as the new active model. Every other entry is
    /// deactivated in the same transaction. An existing entry with the same
    /// name is replaced.
    fn save(&self, entry: &NewRegistryEntry, artifact: &StoredArtifact) -> EffortResult<i64>;

    /// Active entry with the latest `updated_at`.
    fn get_active(&self) -> EffortResult<Option<RegistryEntry>>;

    fn get(&self, id: i64) -> EffortResult<Option<RegistryEntry>>;

    /// All entries, most recently updated first.
    fn list_all(&self) -> EffortResult<Vec<RegistryEntry>>;

    /// Remove an entry and its version rows. Returns false if `id` is unknown.
    /// Never promotes another entry to active.
    fn delete(&self, id: i64) -> EffortResult<bool>;

    fn stats(&self) -> EffortResult<RegistryStats>;

    fn versions(&self, model_id: i64) -> EffortResult<Vec<ModelVersion>>;
}
