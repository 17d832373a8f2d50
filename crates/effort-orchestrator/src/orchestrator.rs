//! Orchestrator: owns the configuration, the in-memory model and the
//! registry/artifact store pair.
//!
//! The model is `None` until `train_model` or `load_model` succeeds; every
//! operation that needs it fails with `ModelNotTrained` before then.

use std::path::Path;

use effort_core::constants::MODEL_KIND;
use effort_core::errors::{EffortError, EffortResult, PersistenceError};
use effort_core::models::{
    CrossValidationReport, IssueManifest, ModelInfo, ModelVersion, NewRegistryEntry,
    NotificationPayload, NotificationRow, RegistryEntry, RegistryStats, SummaryReport,
    TrainingMetrics,
};
use effort_core::traits::{IArtifactStore, IModelRegistry};
use effort_core::{CorrectedTable, EffortConfig, RawTable};
use effort_features::FeatureBuilder;
use effort_observability::{events, init_tracing_with_config};
use effort_prediction::ConstrainedPredictor;
use effort_storage::{ArtifactStore, RegistryEngine};
use effort_training::{cross_validate, ModelArtifact, TrainOptions, TrainingPipeline};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{issues, report};

/// Everything produced for one batch by [`Orchestrator::process`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingOutcome {
    pub corrected: CorrectedTable,
    pub issues: IssueManifest,
    pub notifications: Vec<NotificationRow>,
    pub summary: SummaryReport,
}

pub struct Orchestrator<R, A> {
    config: EffortConfig,
    registry: R,
    store: A,
    builder: FeatureBuilder,
    pipeline: TrainingPipeline,
    predictor: ConstrainedPredictor,
    model: Option<ModelArtifact>,
}

impl Orchestrator<RegistryEngine, ArtifactStore> {
    /// Open the SQLite registry and artifact directory named in `config`
    /// and initialise logging.
    pub fn open(config: EffortConfig) -> EffortResult<Self> {
        init_tracing_with_config(&config.observability);
        let registry = RegistryEngine::from_config(&config.storage)?;
        let store = ArtifactStore::open(&config.storage.artifact_dir)?;
        Self::new(config, registry, store)
    }
}

impl<R, A> Orchestrator<R, A>
where
    R: IModelRegistry,
    A: IArtifactStore,
{
    pub fn new(config: EffortConfig, registry: R, store: A) -> EffortResult<Self> {
        config.validate()?;
        let pipeline = TrainingPipeline::from_config(&config);
        Ok(Self {
            config,
            registry,
            store,
            builder: FeatureBuilder::new(),
            pipeline,
            predictor: ConstrainedPredictor::new(),
            model: None,
        })
    }

    pub fn config(&self) -> &EffortConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&ModelArtifact> {
        self.model.as_ref()
    }

    fn require_model(&self) -> EffortResult<&ModelArtifact> {
        self.model.as_ref().ok_or(EffortError::ModelNotTrained)
    }

    /// Train a new model on `raw` and keep it in memory. Nothing is persisted.
    pub fn train_model(&mut self, raw: &RawTable) -> EffortResult<TrainingMetrics> {
        let (table, schema) = self.builder.prepare(raw)?;
        let options = TrainOptions::from_config(&self.config);
        let trained = self.pipeline.train(&table, &options)?;
        let artifact = ModelArtifact::new(trained, schema, options.ceiling);
        let metrics = artifact.metrics.clone();
        self.model = Some(artifact);
        Ok(metrics)
    }

    /// Fill missing efforts and truncate over-limit efforts using the
    /// in-memory model.
    pub fn predict(&self, raw: &RawTable) -> EffortResult<CorrectedTable> {
        let artifact = self.require_model()?;
        let table = self.builder.prepare_with_schema(raw, &artifact.schema)?;
        self.predictor.predict(artifact, &table)
    }

    /// Predict, then extract issues, notification rows and the summary.
    pub fn process(&self, raw: &RawTable) -> EffortResult<ProcessingOutcome> {
        let corrected = self.predict(raw)?;
        let issues = self.identify_issues(&corrected);
        let notifications = self.build_notification_rows(&corrected, &issues);
        let summary = self.summary_report(&corrected, &issues);
        Ok(ProcessingOutcome {
            corrected,
            issues,
            notifications,
            summary,
        })
    }

    /// Persist the in-memory model and make it the active registry entry.
    ///
    /// The artifact file is written first. If the registry write fails the
    /// file is removed before the error is returned.
    pub fn save_model(&self) -> EffortResult<RegistryEntry> {
        let artifact = self.require_model()?;
        let model_name = format!("effort_model_{}", Uuid::new_v4().simple());
        let bytes = artifact.to_bytes()?;
        let metrics =
            serde_json::to_value(&artifact.metrics).map_err(|e| PersistenceError::CorruptArtifact {
                path: model_name.clone(),
                reason: e.to_string(),
            })?;

        let stored = self.store.write(&format!("{model_name}.json"), &bytes)?;
        let entry = NewRegistryEntry {
            model_name,
            model_type: artifact.model_type.clone(),
            metrics,
            feature_count: artifact.schema.len(),
            training_samples: artifact.metrics.training_samples,
            effort_limit: artifact.ceiling,
        };

        let id = match self.registry.save(&entry, &stored) {
            Ok(id) => id,
            Err(err) => {
                events::artifact_compensated(&stored.file_path, &err.to_string());
                if let Err(cleanup) = self.store.remove(Path::new(&stored.file_path)) {
                    tracing::error!(
                        file_path = %stored.file_path,
                        error = %cleanup,
                        "failed to remove orphaned artifact"
                    );
                }
                return Err(err);
            }
        };
        events::model_saved(id, &entry.model_name, &stored.file_path);

        self.registry.get(id)?.ok_or_else(|| {
            PersistenceError::Sqlite {
                message: format!("registry entry {id} missing after save"),
            }
            .into()
        })
    }

    /// Load a registry entry's artifact into memory, verifying its checksum.
    /// `None` loads the active entry.
    pub fn load_model(&mut self, id: Option<i64>) -> EffortResult<RegistryEntry> {
        let entry = match id {
            None => self.registry.get_active()?.ok_or(EffortError::NoActiveModel)?,
            Some(id) => self.registry.get(id)?.ok_or_else(|| EffortError::InvalidInput {
                reason: format!("no registry entry with id {id}"),
            })?,
        };
        let bytes = self
            .store
            .read(Path::new(&entry.file_path), Some(&entry.artifact_hash))?;
        let artifact = ModelArtifact::from_bytes(&bytes, &entry.file_path)?;
        events::model_loaded(&entry.model_name);
        self.model = Some(artifact);
        Ok(entry)
    }

    /// Load an artifact file that is not tracked by the registry.
    pub fn load_model_file(&mut self, path: &Path) -> EffortResult<()> {
        let bytes = self.store.read(path, None)?;
        let source = path.display().to_string();
        let artifact = ModelArtifact::from_bytes(&bytes, &source)?;
        events::model_loaded(&source);
        self.model = Some(artifact);
        Ok(())
    }

    pub fn list_models(&self) -> EffortResult<Vec<RegistryEntry>> {
        self.registry.list_all()
    }

    pub fn registry_stats(&self) -> EffortResult<RegistryStats> {
        self.registry.stats()
    }

    pub fn model_versions(&self, model_id: i64) -> EffortResult<Vec<ModelVersion>> {
        self.registry.versions(model_id)
    }

    /// Remove a registry entry and its artifact file. The in-memory model is
    /// left as is and no other entry becomes active.
    pub fn delete_model(&self, id: i64) -> EffortResult<bool> {
        let Some(entry) = self.registry.get(id)? else {
            events::model_deleted(id, false);
            return Ok(false);
        };
        let removed = self.registry.delete(id)?;
        // The entry is gone once the delete commits; a file left behind is
        // only logged.
        if removed {
            if let Err(err) = self.store.remove(Path::new(&entry.file_path)) {
                tracing::error!(
                    id,
                    file_path = %entry.file_path,
                    error = %err,
                    "failed to remove artifact of deleted model"
                );
            }
        }
        events::model_deleted(id, removed);
        Ok(removed)
    }

    pub fn identify_issues(&self, table: &CorrectedTable) -> IssueManifest {
        issues::identify_issues(table)
    }

    pub fn build_notification_rows(
        &self,
        table: &CorrectedTable,
        manifest: &IssueManifest,
    ) -> Vec<NotificationRow> {
        issues::build_notification_rows(table, manifest)
    }

    pub fn summary_report(&self, table: &CorrectedTable, manifest: &IssueManifest) -> SummaryReport {
        report::summary_report(table, manifest, self.config.limits.missing_value_threshold)
    }

    pub fn notification_payload(
        &self,
        notifications: Vec<NotificationRow>,
        summary: SummaryReport,
    ) -> NotificationPayload {
        report::notification_payload(notifications, summary)
    }

    /// K-fold cross-validation of the current model's parameters on `raw`,
    /// using the current model's feature schema.
    /// K-fold evaluation of the current model's parameters on `raw`.
    /// `folds` defaults to `training.cv_folds`.
    pub fn cross_validate(
        &self,
        raw: &RawTable,
        folds: Option<usize>,
    ) -> EffortResult<CrossValidationReport> {
        let artifact = self.require_model()?;
        let table = self.builder.prepare_with_schema(raw, &artifact.schema)?;
        let folds = folds.unwrap_or(self.config.training.cv_folds);
        cross_validate(&table, artifact.ceiling, &artifact.params, folds)
    }

    pub fn model_info(&self) -> ModelInfo {
        match &self.model {
            Some(artifact) => artifact.info(),
            None => ModelInfo {
                model_type: MODEL_KIND.to_string(),
                is_trained: false,
                effort_limit: self.config.limits.effort_ceiling,
                feature_count: 0,
                categorical_features: 0,
                metrics: None,
            },
        }
    }
}
