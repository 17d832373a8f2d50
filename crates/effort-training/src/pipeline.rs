//! TrainingPipeline: prepared table → regressor + scaler + metrics.

use std::collections::BTreeMap;

use effort_core::config::BoostingConfig;
use effort_core::constants::{DEFAULT_SEED, IQR_MULTIPLIER, MIN_TRAINING_ROWS};
use effort_core::errors::{EffortError, EffortResult};
use effort_core::models::TrainingMetrics;
use effort_core::{stats, EffortConfig, PreparedTable};

use crate::boosting::{BoostedModel, BoostingTrainer};
use crate::dataset::Dataset;
use crate::metrics;
use crate::scaler::StandardScaler;
use crate::split::train_test_split;
use crate::tuning::grid_search;

/// Per-call training options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOptions {
    pub ceiling: f64,
    pub test_fraction: f64,
    pub hyperparameter_tuning: bool,
    pub fast_mode: bool,
}

impl TrainOptions {
    pub fn from_config(config: &EffortConfig) -> Self {
        Self {
            ceiling: config.limits.effort_ceiling,
            test_fraction: config.training.test_fraction,
            hyperparameter_tuning: config.training.hyperparameter_tuning,
            fast_mode: config.training.fast_mode,
        }
    }

    fn validate(&self) -> EffortResult<()> {
        if !self.ceiling.is_finite() || self.ceiling <= 0.0 {
            return Err(EffortError::InvalidInput {
                reason: format!("effort ceiling must be positive, got {}", self.ceiling),
            });
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(EffortError::InvalidInput {
                reason: format!("test fraction must be in (0, 1), got {}", self.test_fraction),
            });
        }
        Ok(())
    }
}

/// Output of a training run. Nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub regressor: BoostedModel,
    pub scaler: StandardScaler,
    pub metrics: TrainingMetrics,
    /// Parameters of the final fit (grid winner when tuned).
    pub params: BoostingConfig,
}

#[derive(Debug, Clone)]
pub struct TrainingPipeline {
    boosting: BoostingConfig,
    tuning_folds: usize,
    workers: usize,
}

impl TrainingPipeline {
    pub fn new(boosting: BoostingConfig, tuning_folds: usize, workers: usize) -> Self {
        Self {
            boosting,
            tuning_folds,
            workers,
        }
    }

    pub fn from_config(config: &EffortConfig) -> Self {
        Self::new(
            config.boosting.clone(),
            config.training.tuning_folds,
            config.training.workers,
        )
    }

    pub fn boosting(&self) -> &BoostingConfig {
        &self.boosting
    }

    /// Train on the labelled rows of `table`.
    ///
    /// Fails with `InsufficientData` when fewer than
    /// [`MIN_TRAINING_ROWS`] rows carry an effort value.
    pub fn train(&self, table: &PreparedTable, options: &TrainOptions) -> EffortResult<TrainedModel> {
        options.validate()?;
        self.boosting.validate()?;
        let mut data = Dataset::from_labelled(table);
        if data.len() < MIN_TRAINING_ROWS {
            return Err(EffortError::InsufficientData {
                available: data.len(),
                required: MIN_TRAINING_ROWS,
            });
        }
        let _span = effort_observability::training_span!(data.len(), options.ceiling).entered();

        data.cap_target(options.ceiling);
        let (lower, upper) = iqr_bounds(&data.target);
        let keep: Vec<bool> = data
            .target
            .iter()
            .map(|y| *y >= lower && *y <= upper)
            .collect();
        let outliers_removed = keep.iter().filter(|k| !**k).count();
        data.retain_rows(&keep);
        tracing::debug!(outliers_removed, lower, upper, "IQR filter applied");
        if data.len() < 2 {
            return Err(EffortError::InsufficientData {
                available: data.len(),
                required: 2,
            });
        }

        let split = train_test_split(data.len(), options.test_fraction, DEFAULT_SEED);
        let mut train = data.subset(&split.train);
        let mut test = data.subset(&split.test);
        let scaler = StandardScaler::fit(&train.numeric);
        scaler.transform_dataset(&mut train)?;
        scaler.transform_dataset(&mut test)?;

        let tuned = options.hyperparameter_tuning && !options.fast_mode;
        let params = if tuned {
            grid_search(&train, &self.boosting, self.tuning_folds, self.workers).params
        } else {
            self.boosting.clone()
        };

        let regressor = BoostingTrainer::new(params.clone())?.fit(&train, Some(&test));
        let train_pred = predict_all(&regressor, &train)?;
        let test_pred = predict_all(&regressor, &test)?;

        let feature_importance: BTreeMap<String, f64> = table
            .feature_names()
            .into_iter()
            .zip(regressor.feature_importance.iter().copied())
            .collect();

        let metrics = TrainingMetrics {
            train_rmse: metrics::rmse(&train.target, &train_pred),
            test_rmse: metrics::rmse(&test.target, &test_pred),
            train_mae: metrics::mae(&train.target, &train_pred),
            test_mae: metrics::mae(&test.target, &test_pred),
            train_r2: metrics::r2(&train.target, &train_pred),
            test_r2: metrics::r2(&test.target, &test_pred),
            training_samples: train.len(),
            test_samples: test.len(),
            outliers_removed,
            tree_count: regressor.n_trees(),
            feature_importance,
            tuned,
        };
        effort_observability::events::model_trained(&metrics);

        Ok(TrainedModel {
            regressor,
            scaler,
            metrics,
            params,
        })
    }
}

/// `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]` with linearly interpolated quartiles.
pub fn iqr_bounds(values: &[f64]) -> (f64, f64) {
    let q1 = stats::quantile(values, 0.25).unwrap_or(0.0);
    let q3 = stats::quantile(values, 0.75).unwrap_or(0.0);
    let iqr = q3 - q1;
    (q1 - IQR_MULTIPLIER * iqr, q3 + IQR_MULTIPLIER * iqr)
}

fn predict_all(model: &BoostedModel, data: &Dataset) -> EffortResult<Vec<f64>> {
    data.numeric
        .iter()
        .zip(&data.categorical)
        .map(|(n, c)| model.predict(n, c).map_err(EffortError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iqr_bounds_on_capped_scenario_targets() {
        let targets = [6.5, 7.0, 8.0, 30.0, 5.5, 7.5, 6.0, 8.5, 7.0, 6.5];
        let (lower, upper) = iqr_bounds(&targets);
        assert!((lower - 4.4375).abs() < 1e-12);
        assert!((upper - 9.9375).abs() < 1e-12);
    }
}
