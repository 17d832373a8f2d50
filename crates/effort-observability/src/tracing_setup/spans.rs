//! Span definitions per operation: training, tuning, prediction, registry.

/// Create a training span.
#[macro_export]
macro_rules! training_span {
    ($rows:expr, $ceiling:expr) => {
        tracing::info_span!("effort.training", rows = $rows, ceiling = $ceiling)
    };
}

/// Create a grid search span.
#[macro_export]
macro_rules! tuning_span {
    ($candidates:expr, $workers:expr) => {
        tracing::info_span!("effort.tuning", candidates = $candidates, workers = $workers)
    };
}

/// Create a prediction span.
#[macro_export]
macro_rules! prediction_span {
    ($rows:expr, $ceiling:expr) => {
        tracing::info_span!("effort.prediction", rows = $rows, ceiling = $ceiling)
    };
}

/// Create a registry operation span.
#[macro_export]
macro_rules! registry_span {
    ($operation:expr) => {
        tracing::info_span!("effort.registry", operation = %$operation)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const TRAINING: &str = "effort.training";
    pub const TUNING: &str = "effort.tuning";
    pub const PREDICTION: &str = "effort.prediction";
    pub const REGISTRY: &str = "effort.registry";
}
