use std::path::Path;

use crate::errors::EffortResult;
use crate::models::StoredArtifact;

/// Blob storage for serialized model artifacts.
pub trait IArtifactStore: Send + Sync {
    /// Write `bytes` atomically under `name`.
    fn write(&self, name: &str, bytes: &[u8]) -> EffortResult<StoredArtifact>;

    /// Read an artifact, verifying its checksum when `expected_hash` is given.
    fn read(&self, path: &Path, expected_hash: Option<&str>) -> EffortResult<Vec<u8>>;

    /// Delete an artifact. A missing file is not an error.
    fn remove(&self, path: &Path) -> EffortResult<()>;
}
