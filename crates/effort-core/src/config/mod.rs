//! Configuration system for the effort pipeline.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod boosting_config;
pub mod defaults;
pub mod effort_config;
pub mod limits_config;
pub mod observability_config;
pub mod storage_config;
pub mod training_config;

pub use boosting_config::{BoostingConfig, BootstrapKind};
pub use effort_config::{ConfigOverrides, EffortConfig};
pub use limits_config::LimitsConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
pub use training_config::TrainingConfig;
