//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

use effort_core::models::{PolicyViolation, TrainingMetrics};

/// Log a completed training run.
pub fn model_trained(metrics: &TrainingMetrics) {
    tracing::info!(
        event = "model_trained",
        training_samples = metrics.training_samples,
        test_samples = metrics.test_samples,
        outliers_removed = metrics.outliers_removed,
        tree_count = metrics.tree_count,
        test_rmse = metrics.test_rmse,
        test_r2 = metrics.test_r2,
        tuned = metrics.tuned,
        "model trained"
    );
}

/// Log the winner of a grid search.
pub fn tuning_completed(candidates: usize, best_score: f64) {
    tracing::info!(
        event = "tuning_completed",
        candidates = candidates,
        best_score = best_score,
        "hyperparameter search completed"
    );
}

/// Log a completed prediction pass.
pub fn prediction_completed(rows: usize, predicted: usize, violations: usize) {
    tracing::info!(
        event = "prediction_completed",
        rows = rows,
        predicted = predicted,
        violations = violations,
        "prediction completed"
    );
}

/// Log a ceiling breach caught by a validation sweep.
pub fn policy_violation(violation: &PolicyViolation) {
    tracing::warn!(
        event = "policy_violation",
        row_index = violation.row_index,
        pass = ?violation.pass,
        value = violation.value,
        ceiling = violation.ceiling,
        "value above ceiling clamped"
    );
}

/// Log a model registration.
pub fn model_saved(id: i64, model_name: &str, file_path: &str) {
    tracing::info!(
        event = "model_saved",
        id = id,
        model_name = %model_name,
        file_path = %file_path,
        "model saved"
    );
}

/// Log a model load from the registry or a file.
pub fn model_loaded(source: &str) {
    tracing::info!(event = "model_loaded", source = %source, "model loaded");
}

/// Log a model deletion.
pub fn model_deleted(id: i64, found: bool) {
    tracing::info!(event = "model_deleted", id = id, found = found, "model deleted");
}

/// Log removal of an artifact written for a registry save that failed.
pub fn artifact_compensated(file_path: &str, reason: &str) {
    tracing::warn!(
        event = "artifact_compensated",
        file_path = %file_path,
        reason = %reason,
        "artifact removed after failed registry write"
    );
}
