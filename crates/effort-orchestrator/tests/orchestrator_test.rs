//! End-to-end orchestrator flows against a temporary on-disk registry.

use std::path::Path;

use effort_core::config::BoostingConfig;
use effort_core::errors::{EffortErrorCode, PersistenceError};
use effort_core::models::{
    IssueCategory, ModelVersion, NewRegistryEntry, RegistryEntry, RegistryStats, StoredArtifact,
};
use effort_core::traits::{IArtifactStore, IModelRegistry};
use effort_core::{EffortConfig, EffortError, EffortResult};
use effort_core::{CorrectedRow, CorrectedTable, RowContext};
use effort_orchestrator::{build_notification_rows, identify_issues, summary_report, Orchestrator};
use effort_storage::{ArtifactStore, RegistryEngine};
use proptest::prelude::*;
use tempfile::TempDir;
use test_fixtures::{scenario_table, synthetic_table, table_with_efforts};

fn config(dir: &Path) -> EffortConfig {
    let mut config = EffortConfig::default();
    config.boosting = BoostingConfig {
        iterations: 60,
        depth: 4,
        ..BoostingConfig::default()
    };
    config.training.fast_mode = true;
    config.storage.db_path = dir.join("models.db").display().to_string();
    config.storage.artifact_dir = dir.join("models").display().to_string();
    config
}

fn open(dir: &TempDir) -> Orchestrator<RegistryEngine, ArtifactStore> {
    Orchestrator::open(config(dir.path())).unwrap()
}

fn artifact_files(dir: &Path) -> usize {
    std::fs::read_dir(dir.join("models")).unwrap().count()
}

#[test]
fn untrained_orchestrator_refuses_model_operations() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = open(&dir);

    assert!(!orchestrator.is_trained());
    assert!(matches!(
        orchestrator.predict(&scenario_table()),
        Err(EffortError::ModelNotTrained)
    ));
    assert!(matches!(orchestrator.save_model(), Err(EffortError::ModelNotTrained)));
    assert!(matches!(
        orchestrator.cross_validate(&synthetic_table(20), Some(5)),
        Err(EffortError::ModelNotTrained)
    ));

    let info = orchestrator.model_info();
    assert!(!info.is_trained);
    assert_eq!(info.effort_limit, 30.0);
    assert!(info.metrics.is_none());
}

#[test]
fn loading_from_an_empty_registry_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut orchestrator = open(&dir);
    let err = orchestrator.load_model(None).unwrap_err();
    assert!(matches!(err, EffortError::NoActiveModel));
    assert_eq!(err.error_code(), "NO_ACTIVE_MODEL");
}

#[test]
fn scenario_batch_is_corrected_and_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut orchestrator = open(&dir);
    let metrics = orchestrator.train_model(&scenario_table()).unwrap();
    assert_eq!(metrics.outliers_removed, 1);

    let outcome = orchestrator.process(&scenario_table()).unwrap();
    assert!(outcome.corrected.rows.iter().all(|r| r.final_value.unwrap() <= 30.0));
    assert_eq!(outcome.issues.missing_rows(), vec![2, 7]);
    assert_eq!(outcome.issues.over_limit_rows(), vec![4]);

    let emails: Vec<&str> = outcome.notifications.iter().map(|n| n.user_email.as_str()).collect();
    assert_eq!(emails.len(), 3);
    assert_eq!(outcome.notifications[1].issue_type, IssueCategory::OverLimit);
    assert_eq!(outcome.notifications[1].original_effort, Some(45.0));
    assert_eq!(outcome.notifications[1].final_effort, Some(30.0));

    let summary = &outcome.summary;
    assert_eq!(summary.total_rows, 12);
    assert_eq!(summary.missing_effort_count, 2);
    assert_eq!(summary.over_limit_count, 1);
    assert_eq!(summary.predicted_count, 3);
    assert_eq!(summary.notification_count, 3);
    assert!((summary.missing_percentage - 200.0 / 12.0).abs() < 1e-9);
    assert!(summary.missing_threshold_exceeded);
    assert_eq!(summary.policy_violations, 0);

    let payload = orchestrator.notification_payload(outcome.notifications, outcome.summary);
    assert_eq!(payload.event_type, "effort_expense_alert");
    assert_eq!(payload.metadata.system, "effort_expense_management");
    assert!(payload.metadata.processing_required);
    let json = serde_json::to_value(&payload).unwrap();
    assert!(json["notifications"][0].get("userid").is_some());
}

#[test]
fn saved_model_predicts_identically_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let batch = table_with_efforts(&[None, Some(42.0), Some(6.0), None, Some(31.5)]);

    let (entry, expected) = {
        let mut orchestrator = open(&dir);
        orchestrator.train_model(&synthetic_table(40)).unwrap();
        let entry = orchestrator.save_model().unwrap();
        (entry, orchestrator.predict(&batch).unwrap())
    };
    assert!(entry.is_active);
    assert!(entry.model_name.starts_with("effort_model_"));
    assert!(Path::new(&entry.file_path).exists());

    let mut reopened = open(&dir);
    let loaded = reopened.load_model(None).unwrap();
    assert_eq!(loaded.id, entry.id);
    assert_eq!(reopened.predict(&batch).unwrap(), expected);
    assert_eq!(reopened.model_versions(entry.id).unwrap().len(), 1);
}

#[test]
fn tampered_artifact_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut orchestrator = open(&dir);
    orchestrator.train_model(&synthetic_table(20)).unwrap();
    let entry = orchestrator.save_model().unwrap();
    std::fs::write(&entry.file_path, b"{}").unwrap();

    assert!(matches!(
        orchestrator.load_model(Some(entry.id)),
        Err(EffortError::Persistence(PersistenceError::ChecksumMismatch { .. }))
    ));
}

#[test]
fn newest_save_becomes_active() {
    let dir = tempfile::tempdir().unwrap();
    let mut orchestrator = open(&dir);
    orchestrator.train_model(&synthetic_table(20)).unwrap();
    let first = orchestrator.save_model().unwrap();
    let second = orchestrator.save_model().unwrap();

    let models = orchestrator.list_models().unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].id, second.id);
    assert!(!models[1].is_active);
    assert_eq!(models[1].id, first.id);

    let stats = orchestrator.registry_stats().unwrap();
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.active_count, 1);
}

#[test]
fn delete_removes_entry_and_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let mut orchestrator = open(&dir);
    orchestrator.train_model(&synthetic_table(20)).unwrap();
    let entry = orchestrator.save_model().unwrap();
    assert_eq!(artifact_files(dir.path()), 1);

    assert!(orchestrator.delete_model(entry.id).unwrap());
    assert_eq!(artifact_files(dir.path()), 0);
    assert!(orchestrator.list_models().unwrap().is_empty());
    assert!(!orchestrator.delete_model(entry.id).unwrap());
    assert!(matches!(orchestrator.load_model(None), Err(EffortError::NoActiveModel)));
    assert!(orchestrator.is_trained());
}

#[test]
fn cross_validation_uses_the_current_schema() {
    let dir = tempfile::tempdir().unwrap();
    let mut orchestrator = open(&dir);
    orchestrator.train_model(&synthetic_table(30)).unwrap();
    let report = orchestrator.cross_validate(&synthetic_table(30), Some(4)).unwrap();
    assert_eq!(report.fold_rmse.len(), 4);
    assert!(report.mean_rmse.is_finite());

    let info = orchestrator.model_info();
    assert!(info.is_trained);
    assert_eq!(info.feature_count, 12);
    assert_eq!(info.categorical_features, 5);
}

#[test]
fn cross_validation_defaults_to_configured_folds() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.training.cv_folds = 3;
    let mut orchestrator = Orchestrator::open(config).unwrap();
    orchestrator.train_model(&synthetic_table(30)).unwrap();

    let report = orchestrator.cross_validate(&synthetic_table(30), None).unwrap();
    assert_eq!(report.folds, 3);
    assert_eq!(report.fold_rmse.len(), 3);
}

/// Registry whose writes always fail.
struct FailingRegistry;

impl IModelRegistry for FailingRegistry {
    fn save(&self, _: &NewRegistryEntry, _: &StoredArtifact) -> EffortResult<i64> {
        Err(PersistenceError::Sqlite {
            message: "database is locked".to_string(),
        }
        .into())
    }
    fn get_active(&self) -> EffortResult<Option<RegistryEntry>> {
        Ok(None)
    }
    fn get(&self, _: i64) -> EffortResult<Option<RegistryEntry>> {
        Ok(None)
    }
    fn list_all(&self) -> EffortResult<Vec<RegistryEntry>> {
        Ok(Vec::new())
    }
    fn delete(&self, _: i64) -> EffortResult<bool> {
        Ok(false)
    }
    fn stats(&self) -> EffortResult<RegistryStats> {
        Ok(RegistryStats {
            total_count: 0,
            active_count: 0,
            latest_type: None,
            latest_update: None,
        })
    }
    fn versions(&self, _: i64) -> EffortResult<Vec<ModelVersion>> {
        Ok(Vec::new())
    }
}

#[test]
fn failed_registry_write_removes_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let store = ArtifactStore::open(&config.storage.artifact_dir).unwrap();
    let mut orchestrator = Orchestrator::new(config, FailingRegistry, store).unwrap();
    orchestrator.train_model(&synthetic_table(20)).unwrap();

    let err = orchestrator.save_model().unwrap_err();
    assert!(matches!(
        err,
        EffortError::Persistence(PersistenceError::Sqlite { .. })
    ));
    assert_eq!(artifact_files(dir.path()), 0);
}

/// Artifact store that cannot delete files.
struct UndeletableStore(ArtifactStore);

impl IArtifactStore for UndeletableStore {
    fn write(&self, name: &str, bytes: &[u8]) -> EffortResult<StoredArtifact> {
        self.0.write(name, bytes)
    }
    fn read(&self, path: &Path, expected_hash: Option<&str>) -> EffortResult<Vec<u8>> {
        self.0.read(path, expected_hash)
    }
    fn remove(&self, path: &Path) -> EffortResult<()> {
        Err(PersistenceError::Io {
            path: path.display().to_string(),
            message: "permission denied".to_string(),
        }
        .into())
    }
}

#[test]
fn delete_succeeds_when_the_artifact_cannot_be_removed() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let store = UndeletableStore(ArtifactStore::open(&config.storage.artifact_dir).unwrap());
    let registry = RegistryEngine::open_in_memory().unwrap();
    let mut orchestrator = Orchestrator::new(config, registry, store).unwrap();
    orchestrator.train_model(&synthetic_table(20)).unwrap();
    let entry = orchestrator.save_model().unwrap();

    assert!(orchestrator.delete_model(entry.id).unwrap());
    assert!(orchestrator.list_models().unwrap().is_empty());
    assert_eq!(artifact_files(dir.path()), 1);
}

fn corrected_table(efforts: &[Option<f64>], ceiling: f64) -> CorrectedTable {
    let rows = efforts
        .iter()
        .enumerate()
        .map(|(index, effort)| {
            let is_missing = effort.is_none();
            let is_over_limit = effort.is_some_and(|v| v > ceiling);
            let value = match effort {
                Some(v) if *v <= ceiling => *v,
                Some(_) => ceiling,
                None => ceiling / 2.0,
            };
            CorrectedRow {
                index,
                original: *effort,
                is_missing,
                is_over_limit,
                predicted: Some(value),
                final_value: Some(value),
                context: RowContext::default(),
            }
        })
        .collect();
    CorrectedTable {
        ceiling,
        rows,
        violations: Vec::new(),
    }
}

proptest! {
    #[test]
    fn summary_counts_agree_with_issue_rows(
        efforts in proptest::collection::vec(proptest::option::of(0.0f64..60.0), 0..80),
        threshold in 0.0f64..=1.0,
    ) {
        let table = corrected_table(&efforts, 30.0);
        let manifest = identify_issues(&table);
        let rows = build_notification_rows(&table, &manifest);
        let summary = summary_report(&table, &manifest, threshold);

        let missing = efforts.iter().filter(|e| e.is_none()).count();
        let over = efforts.iter().filter(|e| e.is_some_and(|v| v > 30.0)).count();
        prop_assert_eq!(summary.missing_effort_count, missing);
        prop_assert_eq!(summary.over_limit_count, over);
        prop_assert_eq!(summary.notification_count, missing + over);
        prop_assert_eq!(rows.len(), missing + over);
        prop_assert!(rows.windows(2).all(|w| w[0].row_index < w[1].row_index));
        prop_assert!(rows.iter().all(|r| r.user_email.is_empty()));
        if !efforts.is_empty() {
            let share = missing as f64 / efforts.len() as f64;
            prop_assert_eq!(summary.missing_threshold_exceeded, share > threshold);
        }
    }
}
