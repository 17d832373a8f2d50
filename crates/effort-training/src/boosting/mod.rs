//! Gradient boosting over oblivious (symmetric) decision trees.
//!
//! Training workflow:
//! 1. Encode categorical features with ordered target statistics ([`CtrTable`])
//! 2. Quantize every feature into bins ([`BinCuts`], [`QuantizedMatrix`])
//! 3. Grow one oblivious tree per iteration on RMSE gradients ([`grow_tree`])
//! 4. Stop early on the eval set and truncate to the best iteration
//!
//! Categorical values are never one-hot encoded.

mod ctr;
mod model;
mod quantize;
mod trainer;
mod tree;

pub use ctr::CtrTable;
pub use model::BoostedModel;
pub use quantize::{find_cuts, BinCuts, QuantizedMatrix};
pub use trainer::BoostingTrainer;
pub use tree::{grow_tree, leaf_objective, leaf_weight, ObliviousTree, Split, TreeParams};
