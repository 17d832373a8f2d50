//! Deterministic row splits.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffled permutation of `0..n`.
pub fn shuffled_indices(n: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    indices
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` and hold out `ceil(test_fraction * n)` rows, clamped so
/// both sides are non-empty when `n >= 2`.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> TrainTestSplit {
    let wanted = (test_fraction * n as f64).ceil() as usize;
    let n_test = if n >= 2 { wanted.clamp(1, n - 1) } else { 0 };
    let permutation = shuffled_indices(n, seed);
    let (test, train) = permutation.split_at(n_test);
    TrainTestSplit {
        train: train.to_vec(),
        test: test.to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// `k` contiguous folds over `0..n` (optionally shuffled first). The first
/// `n % k` folds get one extra row.
pub fn k_fold(n: usize, k: usize, shuffle_seed: Option<u64>) -> Vec<Fold> {
    let order = match shuffle_seed {
        Some(seed) => shuffled_indices(n, seed),
        None => (0..n).collect(),
    };
    let k = k.max(1);
    let mut folds = Vec::with_capacity(k);
    let mut start = 0;
    for fold in 0..k {
        let size = n / k + usize::from(fold < n % k);
        let end = start + size;
        let validation = order[start..end].to_vec();
        let train = order[..start]
            .iter()
            .chain(&order[end..])
            .copied()
            .collect();
        folds.push(Fold { train, validation });
        start = end;
    }
    folds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rounds_up() {
        let split = train_test_split(9, 0.2, 42);
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 7);
    }

    #[test]
    fn split_is_deterministic_and_disjoint() {
        let a = train_test_split(50, 0.2, 42);
        let b = train_test_split(50, 0.2, 42);
        assert_eq!(a, b);
        let mut all: Vec<usize> = a.train.iter().chain(&a.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn both_sides_non_empty() {
        let split = train_test_split(2, 0.99, 42);
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.train.len(), 1);
    }

    #[test]
    fn folds_cover_every_row_once() {
        let folds = k_fold(11, 3, None);
        let sizes: Vec<usize> = folds.iter().map(|f| f.validation.len()).collect();
        assert_eq!(sizes, vec![4, 4, 3]);
        assert_eq!(folds[0].validation, vec![0, 1, 2, 3]);
        for fold in &folds {
            assert_eq!(fold.train.len() + fold.validation.len(), 11);
        }
    }
}
