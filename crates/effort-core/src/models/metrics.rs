use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Evaluation of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub train_rmse: f64,
    pub test_rmse: f64,
    pub train_mae: f64,
    pub test_mae: f64,
    pub train_r2: f64,
    pub test_r2: f64,
    pub training_samples: usize,
    pub test_samples: usize,
    /// Rows dropped by the IQR filter.
    pub outliers_removed: usize,
    /// Number of trees kept after early stopping.
    pub tree_count: usize,
    /// Feature name → share of total split gain, summing to 100.
    pub feature_importance: BTreeMap<String, f64>,
    /// Whether the grid search picked the final parameters.
    #[serde(default)]
    pub tuned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationReport {
    pub folds: usize,
    pub fold_rmse: Vec<f64>,
    pub mean_rmse: f64,
    /// Population standard deviation of `fold_rmse`.
    pub std_rmse: f64,
}

/// Snapshot of the model currently held by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub is_trained: bool,
    pub effort_limit: f64,
    pub feature_count: usize,
    pub categorical_features: usize,
    pub metrics: Option<TrainingMetrics>,
}
