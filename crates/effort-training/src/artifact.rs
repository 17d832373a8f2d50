//! Serializable model bundle.

use chrono::{DateTime, Utc};
use effort_core::config::BoostingConfig;
use effort_core::constants::{ARTIFACT_FORMAT_VERSION, MODEL_KIND, VERSION};
use effort_core::errors::{EffortResult, PersistenceError, SchemaError};
use effort_core::models::{ModelInfo, TrainingMetrics};
use effort_core::{FeatureSchema, PreparedRow, PreparedTable};
use serde::{Deserialize, Serialize};

use crate::boosting::BoostedModel;
use crate::pipeline::TrainedModel;
use crate::scaler::StandardScaler;

/// Everything prediction needs: regressor, scaler, schema and ceiling.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Library version that wrote the artifact. Informational only.
    pub written_by: String,
    pub model_type: String,
    pub regressor: BoostedModel,
    pub scaler: StandardScaler,
    pub schema: FeatureSchema,
    pub ceiling: f64,
    pub metrics: TrainingMetrics,
    pub params: BoostingConfig,
    pub trained_at: DateTime<Utc>,
}

impl ModelArtifact {
    pub fn new(trained: TrainedModel, schema: FeatureSchema, ceiling: f64) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            written_by: VERSION.to_string(),
            model_type: MODEL_KIND.to_string(),
            regressor: trained.regressor,
            scaler: trained.scaler,
            schema,
            ceiling,
            metrics: trained.metrics,
            params: trained.params,
            trained_at: Utc::now(),
        }
    }

    pub fn to_bytes(&self) -> EffortResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            PersistenceError::CorruptArtifact {
                path: "<memory>".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Decode an artifact read from `source` (used in error messages).
    pub fn from_bytes(bytes: &[u8], source: &str) -> EffortResult<Self> {
        let artifact: Self =
            serde_json::from_slice(bytes).map_err(|e| PersistenceError::CorruptArtifact {
                path: source.to_string(),
                reason: e.to_string(),
            })?;
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(PersistenceError::CorruptArtifact {
                path: source.to_string(),
                reason: format!(
                    "unsupported format version {} (expected {})",
                    artifact.format_version, ARTIFACT_FORMAT_VERSION
                ),
            }
            .into());
        }
        Ok(artifact)
    }

    /// Reject a table whose feature list differs from the training schema.
    pub fn ensure_compatible(&self, table: &PreparedTable) -> Result<(), SchemaError> {
        self.schema
            .ensure_features(table.numeric_features(), table.categorical_features())
    }

    /// Raw (unclamped) model output for one row.
    pub fn predict_row(&self, row: &PreparedRow) -> Result<f64, SchemaError> {
        let scaled = self.scaler.transform(&row.numeric)?;
        self.regressor.predict(&scaled, &row.categorical)
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            model_type: self.model_type.clone(),
            is_trained: true,
            effort_limit: self.ceiling,
            feature_count: self.schema.len(),
            categorical_features: self.schema.categorical_features().len(),
            metrics: Some(self.metrics.clone()),
        }
    }
}
