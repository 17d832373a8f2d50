//! Table and feature schema contract violations.

use super::error_code::{self, EffortErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("required column {column} is absent from the table")]
    MissingTarget { column: String },

    #[error("feature schema mismatch: model expects {expected:?}, table provides {actual:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("row width mismatch: expected {expected} values, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
}

impl EffortErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        error_code::SCHEMA_ERROR
    }
}
