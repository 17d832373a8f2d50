//! # effort-core
//!
//! Foundation crate for the effort correction pipeline.
//! Defines the table and schema types, errors, config, constants, and the
//! registry traits. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod schema;
pub mod stats;
pub mod table;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EffortConfig;
pub use errors::{EffortError, EffortResult};
pub use schema::{Feature, FeatureSchema};
pub use table::{
    Column, CorrectedRow, CorrectedTable, PreparedRow, PreparedTable, RawRow, RawTable, RowContext,
};
