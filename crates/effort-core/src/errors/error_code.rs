//! Stable error codes for callers that cannot match on Rust enums.

/// Every error enum implements this to expose a structured code string.
pub trait EffortErrorCode {
    /// Returns the error code string (e.g., "SCHEMA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const ARTIFACT_ERROR: &str = "ARTIFACT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const NO_ACTIVE_MODEL: &str = "NO_ACTIVE_MODEL";
pub const MODEL_NOT_TRAINED: &str = "MODEL_NOT_TRAINED";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
