use serde::{Deserialize, Serialize};

use super::defaults;

/// Training pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of rows held out for evaluation and early stopping.
    pub test_fraction: f64,
    /// Run the grid search before the final fit.
    pub hyperparameter_tuning: bool,
    /// Skip the grid search regardless of `hyperparameter_tuning`.
    pub fast_mode: bool,
    /// Folds used to score each grid candidate.
    pub tuning_folds: usize,
    /// Folds used by standalone cross-validation.
    pub cv_folds: usize,
    /// Worker threads for the grid search. 0 = one per core.
    pub workers: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: defaults::DEFAULT_TEST_FRACTION,
            hyperparameter_tuning: defaults::DEFAULT_HYPERPARAMETER_TUNING,
            fast_mode: defaults::DEFAULT_FAST_MODE,
            tuning_folds: defaults::DEFAULT_TUNING_FOLDS,
            cv_folds: defaults::DEFAULT_CV_FOLDS,
            workers: defaults::DEFAULT_WORKERS,
        }
    }
}
