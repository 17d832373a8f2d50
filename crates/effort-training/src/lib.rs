//! # effort-training
//!
//! Training side of the effort correction pipeline.
//!
//! - [`TrainingPipeline`]: target capping, IQR outlier filter, split,
//!   scaling, optional grid search, final fit and metrics.
//! - [`boosting`]: gradient-boosted oblivious trees with ordered target
//!   statistics for categorical features.
//! - [`ModelArtifact`]: the serializable bundle handed to prediction and
//!   persistence.

pub mod artifact;
pub mod boosting;
pub mod cross_validation;
pub mod dataset;
pub mod metrics;
pub mod pipeline;
pub mod scaler;
pub mod split;
pub mod tuning;

pub use artifact::ModelArtifact;
pub use boosting::{BoostedModel, BoostingTrainer};
pub use cross_validation::cross_validate;
pub use dataset::Dataset;
pub use pipeline::{TrainOptions, TrainedModel, TrainingPipeline};
pub use scaler::StandardScaler;
