//! # effort-features
//!
//! Turns a [`RawTable`](effort_core::RawTable) into a fully imputed
//! [`PreparedTable`](effort_core::PreparedTable) and the
//! [`FeatureSchema`](effort_core::FeatureSchema) that describes it.

pub mod builder;
pub mod calendar;
pub mod impute;

pub use builder::FeatureBuilder;
pub use calendar::{parse_effort_date, CalendarParts};
