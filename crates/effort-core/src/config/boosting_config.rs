use serde::{Deserialize, Serialize};

use super::defaults;
use super::effort_config::invalid;
use crate::errors::ConfigError;

/// Upper bound on oblivious tree depth.
const MAX_DEPTH: usize = 16;

/// Upper bound on split borders per feature.
const MAX_BORDER_COUNT: usize = 1024;

/// Row sampling applied before each boosting iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapKind {
    /// Keep each row with probability `subsample`.
    Bernoulli,
    /// Weight each row by `(-ln U) ^ bagging_temperature`.
    Bayesian,
    /// Use every row with weight 1.
    No,
}

/// Gradient boosting hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingConfig {
    /// Maximum number of trees.
    pub iterations: usize,
    /// Depth of every oblivious tree (leaves = 2^depth).
    pub depth: usize,
    /// Shrinkage applied to each tree's leaf values.
    pub learning_rate: f64,
    /// L2 regularization on leaf values.
    pub l2_leaf_reg: f64,
    pub bootstrap: BootstrapKind,
    /// Keep probability for Bernoulli bootstrap.
    pub subsample: f64,
    /// Exponent for Bayesian bootstrap weights.
    pub bagging_temperature: f64,
    /// Stop after this many iterations without eval improvement. 0 disables.
    pub early_stopping_rounds: usize,
    /// Maximum number of split borders per feature.
    pub border_count: usize,
    pub seed: u64,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::DEFAULT_ITERATIONS,
            depth: defaults::DEFAULT_DEPTH,
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            l2_leaf_reg: defaults::DEFAULT_L2_LEAF_REG,
            bootstrap: BootstrapKind::Bernoulli,
            subsample: defaults::DEFAULT_SUBSAMPLE,
            bagging_temperature: defaults::DEFAULT_BAGGING_TEMPERATURE,
            early_stopping_rounds: defaults::DEFAULT_EARLY_STOPPING_ROUNDS,
            border_count: defaults::DEFAULT_BORDER_COUNT,
            seed: defaults::DEFAULT_BOOSTING_SEED,
        }
    }
}

impl BoostingConfig {
    /// Bounds every trainer relies on. Checked by `EffortConfig::validate`
    /// and again whenever a trainer is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(invalid("boosting.iterations", "must be greater than 0"));
        }
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(invalid("boosting.depth", "must be between 1 and 16"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid("boosting.learning_rate", "must be in (0.0, 1.0]"));
        }
        if self.l2_leaf_reg < 0.0 {
            return Err(invalid("boosting.l2_leaf_reg", "must not be negative"));
        }
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(invalid("boosting.subsample", "must be in (0.0, 1.0]"));
        }
        if self.border_count == 0 || self.border_count > MAX_BORDER_COUNT {
            return Err(invalid("boosting.border_count", "must be between 1 and 1024"));
        }
        Ok(())
    }
}
