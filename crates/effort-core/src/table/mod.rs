//! Typed tables flowing through the pipeline.
//!
//! `RawTable` → (FeatureBuilder) → `PreparedTable` → (predictor) → `CorrectedTable`.

mod column;
mod corrected;
mod prepared;
mod raw;

pub use column::Column;
pub use corrected::{CorrectedRow, CorrectedTable};
pub use prepared::{PreparedRow, PreparedTable, RowContext};
pub use raw::{RawRow, RawTable};
