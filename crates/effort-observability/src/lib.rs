//! # effort-observability
//!
//! Structured logging for the effort pipeline: subscriber initialisation,
//! named spans per operation and event helpers with stable field names.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_with_config, spans};
