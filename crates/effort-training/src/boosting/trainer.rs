//! Boosting loop: bootstrap, gradients, tree growth, early stopping.

use effort_core::config::{BoostingConfig, BootstrapKind};
use effort_core::errors::ConfigError;
use effort_core::stats;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ctr::CtrTable;
use super::model::BoostedModel;
use super::quantize::{BinCuts, QuantizedMatrix};
use super::tree::{grow_tree, TreeParams};
use crate::dataset::Dataset;
use crate::metrics;
use crate::split::shuffled_indices;

/// Fits a [`BoostedModel`] with squared-error loss.
#[derive(Debug, Clone)]
pub struct BoostingTrainer {
    params: BoostingConfig,
}

impl BoostingTrainer {
    /// Rejects parameters outside [`BoostingConfig::validate`]'s bounds.
    pub fn new(params: BoostingConfig) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &BoostingConfig {
        &self.params
    }

    /// Fit on `train`. When `eval` is given, RMSE on it drives early stopping
    /// and the ensemble is truncated to its best iteration.
    ///
    /// Numeric features are expected to be scaled already.
    pub fn fit(&self, train: &Dataset, eval: Option<&Dataset>) -> BoostedModel {
        let params = &self.params;
        let n_rows = train.len();
        let n_numeric = train.numeric_width();
        let n_categorical = train.categorical_width();
        let base_score = stats::mean(&train.target);

        // Column-major training features: numeric block, then ordered CTRs.
        let mut columns: Vec<Vec<f64>> = (0..n_numeric)
            .map(|f| train.numeric.iter().map(|row| row[f]).collect())
            .collect();
        let permutation = shuffled_indices(n_rows, params.seed);
        let mut ctr_tables = Vec::with_capacity(n_categorical);
        for f in 0..n_categorical {
            let values: Vec<String> = train.categorical.iter().map(|row| row[f].clone()).collect();
            let (table, encoded) =
                CtrTable::fit_ordered(&values, &train.target, base_score, &permutation);
            ctr_tables.push(table);
            columns.push(encoded);
        }
        let n_features = columns.len();
        let train_rows: Vec<Vec<f64>> = (0..n_rows)
            .map(|r| columns.iter().map(|c| c[r]).collect())
            .collect();

        let cuts = BinCuts::fit(&columns, params.border_count);
        let matrix = QuantizedMatrix::new(&columns, &cuts);

        let mut model = BoostedModel {
            base_score,
            n_numeric,
            ctr_tables,
            trees: Vec::with_capacity(params.iterations),
            feature_importance: vec![0.0; n_features],
        };

        let eval_rows: Vec<Vec<f64>> = eval
            .map(|set| {
                set.numeric
                    .iter()
                    .zip(&set.categorical)
                    .filter_map(|(num, cat)| model.encode(num, cat).ok())
                    .collect()
            })
            .unwrap_or_default();
        let eval_target: &[f64] = eval.map_or(&[], |set| set.target.as_slice());
        let use_eval = !eval_rows.is_empty() && eval_rows.len() == eval_target.len();

        let tree_params = TreeParams {
            max_depth: params.depth,
            l2_leaf_reg: params.l2_leaf_reg,
            learning_rate: params.learning_rate,
        };
        let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(1));
        let mut predictions = vec![base_score; n_rows];
        let mut eval_predictions = vec![base_score; eval_rows.len()];
        let mut tree_gains: Vec<Vec<(usize, f64)>> = Vec::with_capacity(params.iterations);
        let mut best_rmse = f64::INFINITY;
        let mut best_iteration = 0usize;
        let mut grad = vec![0.0; n_rows];
        let mut hess = vec![0.0; n_rows];

        for iteration in 0..params.iterations {
            for r in 0..n_rows {
                let weight = bootstrap_weight(params, &mut rng);
                grad[r] = weight * (predictions[r] - train.target[r]);
                hess[r] = weight;
            }

            let (tree, gains) = grow_tree(&matrix, &cuts, &grad, &hess, &tree_params);
            for (p, row) in predictions.iter_mut().zip(&train_rows) {
                *p += tree.predict(row);
            }

            if use_eval {
                for (p, row) in eval_predictions.iter_mut().zip(&eval_rows) {
                    *p += tree.predict(row);
                }
            }
            model.trees.push(tree);
            tree_gains.push(gains);

            if use_eval {
                let rmse = metrics::rmse(eval_target, &eval_predictions);
                if rmse < best_rmse {
                    best_rmse = rmse;
                    best_iteration = iteration;
                } else if params.early_stopping_rounds > 0
                    && iteration - best_iteration >= params.early_stopping_rounds
                {
                    tracing::debug!(
                        iteration,
                        best_iteration,
                        best_rmse,
                        "early stopping"
                    );
                    break;
                }
            }
        }

        if use_eval {
            model.trees.truncate(best_iteration + 1);
            tree_gains.truncate(best_iteration + 1);
        }

        for (feature, gain) in tree_gains.into_iter().flatten() {
            model.feature_importance[feature] += gain;
        }
        let total: f64 = model.feature_importance.iter().sum();
        if total > 0.0 {
            for v in &mut model.feature_importance {
                *v = *v / total * 100.0;
            }
        }
        model
    }
}

fn bootstrap_weight(params: &BoostingConfig, rng: &mut StdRng) -> f64 {
    match params.bootstrap {
        BootstrapKind::No => 1.0,
        BootstrapKind::Bernoulli => {
            if rng.random::<f64>() < params.subsample {
                1.0
            } else {
                0.0
            }
        }
        BootstrapKind::Bayesian => {
            let u = 1.0 - rng.random::<f64>();
            (-u.ln()).powf(params.bagging_temperature)
        }
    }
}
