//! Records produced and consumed by the pipeline operations.

mod issues;
mod metrics;
mod notification;
mod policy;
mod registry;

pub use issues::{IssueCategory, IssueManifest, IssueRecord};
pub use metrics::{CrossValidationReport, ModelInfo, TrainingMetrics};
pub use notification::{NotificationPayload, NotificationRow, PayloadMetadata, SummaryReport};
pub use policy::{PolicyViolation, SweepPass};
pub use registry::{ModelVersion, NewRegistryEntry, RegistryEntry, RegistryStats, StoredArtifact};
