//! # effort-orchestrator
//!
//! Entry point for callers: raw table in, corrected table, issue manifest
//! and notification rows out. Owns the in-memory model and is the only
//! caller of the model registry.

pub mod issues;
pub mod orchestrator;
pub mod report;

pub use issues::{build_notification_rows, identify_issues};
pub use orchestrator::{Orchestrator, ProcessingOutcome};
pub use report::{notification_payload, summary_report};
