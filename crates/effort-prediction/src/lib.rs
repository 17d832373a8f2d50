//! # effort-prediction
//!
//! Applies a trained [`ModelArtifact`](effort_training::ModelArtifact) to
//! rows whose effort is missing or above the ceiling. Every output row
//! satisfies `final <= ceiling`; this is enforced by the initial clamp and
//! re-checked by two independent sweeps.

pub mod predictor;
pub mod sweeps;

pub use predictor::ConstrainedPredictor;
pub use sweeps::{clamp_to_ceiling, sweep_final, sweep_predictions, SweepOutcome};
