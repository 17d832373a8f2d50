/// Library version stamped into every model artifact.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum number of rows with a non-null effort value required to train.
pub const MIN_TRAINING_ROWS: usize = 10;

/// Sentinel used to impute missing categorical values.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Median substitute for a numeric column with no observed values.
pub const EMPTY_COLUMN_FILL: f64 = 0.0;

/// Multiplier applied to the interquartile range for outlier bounds.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Seed shared by every deterministic shuffle in the pipeline.
pub const DEFAULT_SEED: u64 = 42;

/// Model kind recorded in registry entries.
pub const MODEL_KIND: &str = "OrderedBoosting";

/// Version of the on-disk artifact bundle layout.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;
