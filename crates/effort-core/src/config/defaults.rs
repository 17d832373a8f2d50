// Single source of truth for all default values.

// --- Limits ---
pub const DEFAULT_EFFORT_CEILING: f64 = 30.0;
pub const DEFAULT_MISSING_VALUE_THRESHOLD: f64 = 0.1;

// --- Training ---
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
pub const DEFAULT_HYPERPARAMETER_TUNING: bool = false;
pub const DEFAULT_FAST_MODE: bool = true;
pub const DEFAULT_TUNING_FOLDS: usize = 2;
pub const DEFAULT_CV_FOLDS: usize = 5;
pub const DEFAULT_WORKERS: usize = 0; // 0 = one per core

// --- Boosting ---
pub const DEFAULT_ITERATIONS: usize = 200;
pub const DEFAULT_DEPTH: usize = 6;
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_L2_LEAF_REG: f64 = 1.0;
pub const DEFAULT_SUBSAMPLE: f64 = 0.8;
pub const DEFAULT_BAGGING_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_EARLY_STOPPING_ROUNDS: usize = 20;
pub const DEFAULT_BORDER_COUNT: usize = 32;
pub const DEFAULT_BOOSTING_SEED: u64 = 42;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "models.db";
pub const DEFAULT_ARTIFACT_DIR: &str = "models";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
