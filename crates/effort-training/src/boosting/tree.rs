//! Oblivious trees: every node at a given depth uses the same split.

use serde::{Deserialize, Serialize};

use super::quantize::{BinCuts, QuantizedMatrix};

/// Go right when `x[feature] > threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub feature: usize,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObliviousTree {
    /// One split per level. Level `l` sets bit `l` of the leaf index.
    pub splits: Vec<Split>,
    /// `2^splits.len()` values, already scaled by the learning rate.
    pub leaf_values: Vec<f64>,
}

impl ObliviousTree {
    pub fn leaf_index(&self, features: &[f64]) -> usize {
        self.splits
            .iter()
            .enumerate()
            .fold(0, |index, (level, split)| {
                if features[split.feature] > split.threshold {
                    index | (1 << level)
                } else {
                    index
                }
            })
    }

    pub fn predict(&self, features: &[f64]) -> f64 {
        self.leaf_values[self.leaf_index(features)]
    }

    pub fn depth(&self) -> usize {
        self.splits.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub l2_leaf_reg: f64,
    pub learning_rate: f64,
}

/// Objective contribution of a leaf: `-G² / (H + λ)`. Lower is better.
pub fn leaf_objective(grad_sum: f64, hess_sum: f64, lambda: f64) -> f64 {
    let denom = hess_sum + lambda;
    if denom <= 0.0 {
        0.0
    } else {
        -grad_sum * grad_sum / denom
    }
}

/// Newton step for a leaf: `-G / (H + λ)`.
pub fn leaf_weight(grad_sum: f64, hess_sum: f64, lambda: f64) -> f64 {
    let denom = hess_sum + lambda;
    if denom <= 0.0 {
        0.0
    } else {
        -grad_sum / denom
    }
}

/// Grow one oblivious tree level by level. At each level the (feature,
/// border) pair minimising the summed leaf objective over all current leaves
/// is chosen; growth stops early when no split improves the objective.
///
/// Returns the tree and the gain of each split as `(feature, gain)`.
pub fn grow_tree(
    matrix: &QuantizedMatrix,
    cuts: &BinCuts,
    grad: &[f64],
    hess: &[f64],
    params: &TreeParams,
) -> (ObliviousTree, Vec<(usize, f64)>) {
    let n_rows = matrix.n_rows();
    let lambda = params.l2_leaf_reg;
    let mut leaf_of = vec![0usize; n_rows];
    let mut splits = Vec::with_capacity(params.max_depth);
    let mut gains = Vec::with_capacity(params.max_depth);

    for level in 0..params.max_depth {
        let n_leaves = 1usize << level;
        let (leaf_g, leaf_h) = leaf_sums(&leaf_of, grad, hess, n_leaves);
        let parent: f64 = (0..n_leaves)
            .map(|l| leaf_objective(leaf_g[l], leaf_h[l], lambda))
            .sum();

        let mut best: Option<(f64, usize, usize)> = None;
        for feature in 0..matrix.n_features() {
            let n_cuts = cuts.n_cuts(feature);
            if n_cuts == 0 {
                continue;
            }
            let n_bins = n_cuts + 1;
            let mut hist_g = vec![0.0; n_leaves * n_bins];
            let mut hist_h = vec![0.0; n_leaves * n_bins];
            for row in 0..n_rows {
                let slot = leaf_of[row] * n_bins + matrix.bin(feature, row);
                hist_g[slot] += grad[row];
                hist_h[slot] += hess[row];
            }

            let mut scores = vec![0.0; n_cuts];
            for leaf in 0..n_leaves {
                let (mut left_g, mut left_h) = (0.0, 0.0);
                for (border, score) in scores.iter_mut().enumerate() {
                    left_g += hist_g[leaf * n_bins + border];
                    left_h += hist_h[leaf * n_bins + border];
                    *score += leaf_objective(left_g, left_h, lambda)
                        + leaf_objective(leaf_g[leaf] - left_g, leaf_h[leaf] - left_h, lambda);
                }
            }

            for (border, score) in scores.into_iter().enumerate() {
                if best.map_or(true, |(s, _, _)| score < s) {
                    best = Some((score, feature, border));
                }
            }
        }

        let Some((score, feature, border)) = best else {
            break;
        };
        let gain = parent - score;
        if gain <= f64::EPSILON * parent.abs().max(1.0) {
            break;
        }
        gains.push((feature, gain));
        splits.push(Split {
            feature,
            threshold: cuts.cut(feature, border),
        });
        for (row, leaf) in leaf_of.iter_mut().enumerate() {
            if matrix.bin(feature, row) > border {
                *leaf |= 1 << level;
            }
        }
    }

    let n_leaves = 1usize << splits.len();
    let (leaf_g, leaf_h) = leaf_sums(&leaf_of, grad, hess, n_leaves);
    let leaf_values = (0..n_leaves)
        .map(|l| leaf_weight(leaf_g[l], leaf_h[l], lambda) * params.learning_rate)
        .collect();

    (ObliviousTree { splits, leaf_values }, gains)
}

fn leaf_sums(leaf_of: &[usize], grad: &[f64], hess: &[f64], n_leaves: usize) -> (Vec<f64>, Vec<f64>) {
    let mut g = vec![0.0; n_leaves];
    let mut h = vec![0.0; n_leaves];
    for ((leaf, gr), he) in leaf_of.iter().zip(grad).zip(hess) {
        g[*leaf] += gr;
        h[*leaf] += he;
    }
    (g, h)
}
