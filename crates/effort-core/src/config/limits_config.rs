use serde::{Deserialize, Serialize};

use super::defaults;

/// Business-rule limits applied to effort values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum permissible effort in hours. Default: 30.
    pub effort_ceiling: f64,
    /// Share of missing effort values above which a report flags the batch. Default: 0.1.
    pub missing_value_threshold: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            effort_ceiling: defaults::DEFAULT_EFFORT_CEILING,
            missing_value_threshold: defaults::DEFAULT_MISSING_VALUE_THRESHOLD,
        }
    }
}
