use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a model about to be registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRegistryEntry {
    pub model_name: String,
    pub model_type: String,
    pub metrics: serde_json::Value,
    pub feature_count: usize,
    pub training_samples: usize,
    pub effort_limit: f64,
}

/// A persisted registry row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub id: i64,
    pub model_name: String,
    pub model_type: String,
    pub file_path: String,
    pub artifact_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub metrics: serde_json::Value,
    pub feature_count: usize,
    pub training_samples: usize,
    pub effort_limit: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_count: usize,
    pub active_count: usize,
    pub latest_type: Option<String>,
    pub latest_update: Option<DateTime<Utc>>,
}

/// Audit row appended on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersion {
    pub id: i64,
    pub model_id: i64,
    pub version: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    pub metrics: serde_json::Value,
}

/// An artifact blob that has been durably written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArtifact {
    pub file_path: String,
    /// blake3 hex digest of the file contents.
    pub hash: String,
    pub size_bytes: u64,
}
