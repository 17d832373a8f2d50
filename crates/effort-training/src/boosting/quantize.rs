//! Feature quantization into split borders.

use effort_core::stats;
use serde::{Deserialize, Serialize};

/// Candidate split borders for a single feature column.
///
/// With few distinct values every midpoint is a border; otherwise borders
/// sit at evenly spaced quantiles, snapped to midpoints between distinct
/// values.
pub fn find_cuts(column: &[f64], max_borders: usize) -> Vec<f64> {
    let mut sorted: Vec<f64> = column.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    let mut uniques = sorted.clone();
    uniques.dedup();
    if uniques.len() < 2 || max_borders == 0 {
        return Vec::new();
    }
    if uniques.len() - 1 <= max_borders {
        return uniques.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
    }

    let mut cuts: Vec<f64> = Vec::with_capacity(max_borders);
    for k in 1..=max_borders {
        let value = stats::quantile_sorted(&sorted, k as f64 / (max_borders + 1) as f64);
        let pos = uniques.partition_point(|u| *u <= value);
        if pos == 0 || pos >= uniques.len() {
            continue;
        }
        let cut = (uniques[pos - 1] + uniques[pos]) / 2.0;
        if cuts.last().map_or(true, |last| cut > *last) {
            cuts.push(cut);
        }
    }
    cuts
}

/// Borders for every feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinCuts {
    cuts: Vec<Vec<f64>>,
}

impl BinCuts {
    /// `columns` is column-major.
    pub fn fit(columns: &[Vec<f64>], max_borders: usize) -> Self {
        Self {
            cuts: columns.iter().map(|c| find_cuts(c, max_borders)).collect(),
        }
    }

    pub fn n_features(&self) -> usize {
        self.cuts.len()
    }

    pub fn n_cuts(&self, feature: usize) -> usize {
        self.cuts[feature].len()
    }

    pub fn cut(&self, feature: usize, border: usize) -> f64 {
        self.cuts[feature][border]
    }

    /// Number of borders strictly below `value`. `bin > b` iff `value > cut(b)`.
    pub fn bin(&self, feature: usize, value: f64) -> u16 {
        self.cuts[feature].partition_point(|c| *c < value) as u16
    }
}

/// Column-major bin indices.
#[derive(Debug, Clone)]
pub struct QuantizedMatrix {
    bins: Vec<Vec<u16>>,
    n_rows: usize,
}

impl QuantizedMatrix {
    pub fn new(columns: &[Vec<f64>], cuts: &BinCuts) -> Self {
        let bins = columns
            .iter()
            .enumerate()
            .map(|(f, column)| column.iter().map(|v| cuts.bin(f, *v)).collect())
            .collect();
        Self {
            bins,
            n_rows: columns.first().map_or(0, Vec::len),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_features(&self) -> usize {
        self.bins.len()
    }

    pub fn bin(&self, feature: usize, row: usize) -> usize {
        usize::from(self.bins[feature][row])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn few_distinct_values_use_midpoints() {
        assert_eq!(find_cuts(&[1.0, 3.0, 3.0, 5.0], 8), vec![2.0, 4.0]);
    }

    #[test]
    fn constant_column_has_no_cuts() {
        assert!(find_cuts(&[2.0, 2.0, 2.0], 8).is_empty());
    }

    #[test]
    fn many_values_respect_border_budget() {
        let column: Vec<f64> = (0..1000).map(f64::from).collect();
        let cuts = find_cuts(&column, 32);
        assert!(!cuts.is_empty() && cuts.len() <= 32);
        assert!(cuts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn bin_matches_threshold_semantics() {
        let cuts = BinCuts::fit(&[vec![1.0, 2.0, 3.0]], 8);
        assert_eq!(cuts.bin(0, 1.0), 0);
        assert_eq!(cuts.bin(0, 2.0), 1);
        assert_eq!(cuts.bin(0, 10.0), 2);
        // bin > 0 iff value > 1.5
        assert!(cuts.bin(0, 1.6) > 0);
        assert!(cuts.bin(0, 1.4) == 0);
    }
}
