//! Error handling for the effort pipeline.
//! One error enum per subsystem, `thiserror` only, aggregated by [`EffortError`].

pub mod config_error;
pub mod error_code;
pub mod persistence_error;
pub mod schema_error;

pub use config_error::ConfigError;
pub use error_code::EffortErrorCode;
pub use persistence_error::PersistenceError;
pub use schema_error::SchemaError;

use error_code as codes;

/// Result alias used across the workspace.
pub type EffortResult<T> = Result<T, EffortError>;

/// Top-level error returned by every fallible pipeline operation.
///
/// Data, schema and persistence errors propagate to the caller unmodified;
/// ceiling policy violations are never represented here.
#[derive(Debug, thiserror::Error)]
pub enum EffortError {
    #[error("insufficient training data: {available} rows with an effort value, at least {required} required")]
    InsufficientData { available: usize, required: usize },

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("no active model in the registry")]
    NoActiveModel,

    #[error("no trained model available, train or load one first")]
    ModelNotTrained,

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl EffortErrorCode for EffortError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => codes::INSUFFICIENT_DATA,
            Self::Schema(e) => e.error_code(),
            Self::Persistence(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::NoActiveModel => codes::NO_ACTIVE_MODEL,
            Self::ModelNotTrained => codes::MODEL_NOT_TRAINED,
            Self::InvalidInput { .. } => codes::INVALID_INPUT,
        }
    }
}
