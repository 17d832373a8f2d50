use serde::{Deserialize, Serialize};

use super::defaults;

/// Model registry storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite registry database.
    pub db_path: String,
    /// Directory holding serialized model artifacts.
    pub artifact_dir: String,
    /// Number of read connections in the pool.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            artifact_dir: defaults::DEFAULT_ARTIFACT_DIR.to_string(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
