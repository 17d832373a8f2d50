//! Registry and artifact persistence errors.

use super::error_code::{self, EffortErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("artifact {path} is unreadable: {reason}")]
    CorruptArtifact { path: String, reason: String },

    #[error("artifact {path} checksum mismatch: registry has {expected}, file has {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

impl EffortErrorCode for PersistenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::CorruptArtifact { .. } | Self::ChecksumMismatch { .. } => {
                error_code::ARTIFACT_ERROR
            }
            Self::Sqlite { .. } | Self::Io { .. } => error_code::STORAGE_ERROR,
        }
    }
}
