//! Exhaustive grid search over boosting parameters.
//!
//! Candidates are scored by k-fold cross-validation (unshuffled) on the
//! training split with negative MSE; the highest mean score wins and ties go
//! to the earlier candidate. Scoring runs on a dedicated rayon pool.

use effort_core::config::{BoostingConfig, BootstrapKind};
use rayon::prelude::*;

use crate::boosting::BoostingTrainer;
use crate::dataset::Dataset;
use crate::metrics;
use crate::split::k_fold;

const BOOTSTRAP: [BootstrapKind; 2] = [BootstrapKind::Bernoulli, BootstrapKind::Bayesian];
const DEPTH: [usize; 2] = [4, 6];
const EARLY_STOPPING_ROUNDS: [usize; 2] = [10, 20];
const ITERATIONS: [usize; 2] = [100, 200];
const L2_LEAF_REG: [f64; 2] = [1.0, 3.0];
const LEARNING_RATE: [f64; 2] = [0.05, 0.1];

/// Every grid candidate, in evaluation order. Parameters not on the grid
/// are taken from `base`; the last grid axis varies fastest.
pub fn parameter_grid(base: &BoostingConfig) -> Vec<BoostingConfig> {
    let mut grid = Vec::with_capacity(64);
    for bootstrap in BOOTSTRAP {
        for depth in DEPTH {
            for early_stopping_rounds in EARLY_STOPPING_ROUNDS {
                for iterations in ITERATIONS {
                    for l2_leaf_reg in L2_LEAF_REG {
                        for learning_rate in LEARNING_RATE {
                            grid.push(BoostingConfig {
                                bootstrap,
                                depth,
                                early_stopping_rounds,
                                iterations,
                                l2_leaf_reg,
                                learning_rate,
                                ..base.clone()
                            });
                        }
                    }
                }
            }
        }
    }
    grid
}

#[derive(Debug, Clone, PartialEq)]
pub struct TuningOutcome {
    pub params: BoostingConfig,
    /// Mean negative MSE of the winner.
    pub score: f64,
    pub candidates: usize,
}

/// Pick the best grid candidate for `train`. `workers == 0` uses one thread per core.
pub fn grid_search(train: &Dataset, base: &BoostingConfig, folds: usize, workers: usize) -> TuningOutcome {
    let grid = parameter_grid(base);
    let _span = effort_observability::tuning_span!(grid.len(), workers).entered();
    let folds = folds.clamp(2, train.len().max(2));

    let evaluate = || -> Vec<f64> {
        grid.par_iter()
            .map(|params| score_candidate(train, params, folds))
            .collect()
    };
    let scores = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(evaluate),
        Err(e) => {
            tracing::warn!(error = %e, "tuning pool unavailable, using the global pool");
            evaluate()
        }
    };

    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = i;
        }
    }
    let outcome = TuningOutcome {
        params: grid[best].clone(),
        score: scores[best],
        candidates: grid.len(),
    };
    effort_observability::events::tuning_completed(outcome.candidates, outcome.score);
    outcome
}

/// Mean negative MSE over unshuffled folds. No eval set, so early stopping
/// does not apply while scoring.
fn score_candidate(train: &Dataset, params: &BoostingConfig, folds: usize) -> f64 {
    let Ok(trainer) = BoostingTrainer::new(params.clone()) else {
        return f64::NEG_INFINITY;
    };
    let mut total = 0.0;
    let mut counted = 0usize;
    for fold in k_fold(train.len(), folds, None) {
        if fold.train.is_empty() || fold.validation.is_empty() {
            continue;
        }
        let fit_set = train.subset(&fold.train);
        let holdout = train.subset(&fold.validation);
        let model = trainer.fit(&fit_set, None);
        let predictions: Vec<f64> = holdout
            .numeric
            .iter()
            .zip(&holdout.categorical)
            .map(|(n, c)| model.predict(n, c).unwrap_or(model.base_score))
            .collect();
        total -= metrics::mse(&holdout.target, &predictions);
        counted += 1;
    }
    if counted == 0 {
        f64::NEG_INFINITY
    } else {
        total / counted as f64
    }
}
