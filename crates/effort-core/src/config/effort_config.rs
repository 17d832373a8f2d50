//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    BoostingConfig, LimitsConfig, ObservabilityConfig, StorageConfig, TrainingConfig,
};
use crate::errors::ConfigError;

/// Name of the project-level config file looked up by [`EffortConfig::load`].
pub const PROJECT_CONFIG_FILE: &str = "effort.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`EFFORT_*`)
/// 3. Project config (`effort.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EffortConfig {
    pub limits: LimitsConfig,
    pub training: TrainingConfig,
    pub boosting: BoostingConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

/// Caller-supplied overrides, highest priority.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub effort_ceiling: Option<f64>,
    pub fast_mode: Option<bool>,
    pub hyperparameter_tuning: Option<bool>,
    pub workers: Option<usize>,
    pub db_path: Option<String>,
    pub artifact_dir: Option<String>,
}

impl EffortConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        config.apply_env_with(|key| std::env::var(key).ok());

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Keys missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment overrides read through `lookup`.
    /// Pattern: `EFFORT_CEILING`, `EFFORT_FAST_MODE`, etc. Unparseable values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("EFFORT_CEILING").and_then(|v| v.parse::<f64>().ok()) {
            self.limits.effort_ceiling = v;
        }
        if let Some(v) = lookup("EFFORT_MISSING_THRESHOLD").and_then(|v| v.parse::<f64>().ok()) {
            self.limits.missing_value_threshold = v;
        }
        if let Some(v) = lookup("EFFORT_TEST_FRACTION").and_then(|v| v.parse::<f64>().ok()) {
            self.training.test_fraction = v;
        }
        if let Some(v) = lookup("EFFORT_FAST_MODE").and_then(|v| v.parse::<bool>().ok()) {
            self.training.fast_mode = v;
        }
        if let Some(v) = lookup("EFFORT_TUNING").and_then(|v| v.parse::<bool>().ok()) {
            self.training.hyperparameter_tuning = v;
        }
        if let Some(v) = lookup("EFFORT_WORKERS").and_then(|v| v.parse::<usize>().ok()) {
            self.training.workers = v;
        }
        if let Some(v) = lookup("EFFORT_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("EFFORT_ARTIFACT_DIR") {
            self.storage.artifact_dir = v;
        }
        if let Some(v) = lookup("EFFORT_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.effort_ceiling {
            self.limits.effort_ceiling = v;
        }
        if let Some(v) = overrides.fast_mode {
            self.training.fast_mode = v;
        }
        if let Some(v) = overrides.hyperparameter_tuning {
            self.training.hyperparameter_tuning = v;
        }
        if let Some(v) = overrides.workers {
            self.training.workers = v;
        }
        if let Some(ref v) = overrides.db_path {
            self.storage.db_path = v.clone();
        }
        if let Some(ref v) = overrides.artifact_dir {
            self.storage.artifact_dir = v.clone();
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ceiling = self.limits.effort_ceiling;
        if !ceiling.is_finite() || ceiling <= 0.0 {
            return Err(invalid("limits.effort_ceiling", "must be a positive finite number"));
        }
        if !(0.0..=1.0).contains(&self.limits.missing_value_threshold) {
            return Err(invalid("limits.missing_value_threshold", "must be between 0.0 and 1.0"));
        }
        let fraction = self.training.test_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(invalid("training.test_fraction", "must be strictly between 0.0 and 1.0"));
        }
        if self.training.tuning_folds < 2 {
            return Err(invalid("training.tuning_folds", "must be at least 2"));
        }
        if self.training.cv_folds < 2 {
            return Err(invalid("training.cv_folds", "must be at least 2"));
        }
        self.boosting.validate()?;
        if self.storage.read_pool_size == 0 {
            return Err(invalid("storage.read_pool_size", "must be greater than 0"));
        }
        Ok(())
    }
}

pub(super) fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
