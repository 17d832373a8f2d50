//! Ordered target statistics for categorical features.
//!
//! During training each row is encoded using only the rows that precede it
//! in a fixed random permutation, so a row's own target never leaks into its
//! encoding. At inference the statistics of the full training set are used.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct CategoryStats {
    sum: f64,
    count: u32,
}

impl CategoryStats {
    fn encode(&self, prior: f64) -> f64 {
        (self.sum + prior) / (f64::from(self.count) + 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtrTable {
    prior: f64,
    stats: BTreeMap<String, CategoryStats>,
}

impl CtrTable {
    /// Fit on one categorical column, returning the table and the ordered
    /// training encoding (aligned with `values`).
    pub fn fit_ordered(
        values: &[String],
        target: &[f64],
        prior: f64,
        permutation: &[usize],
    ) -> (Self, Vec<f64>) {
        let mut stats: BTreeMap<String, CategoryStats> = BTreeMap::new();
        let mut encoded = vec![prior; values.len()];
        for &row in permutation {
            let entry = stats.entry(values[row].clone()).or_default();
            encoded[row] = entry.encode(prior);
            entry.sum += target[row];
            entry.count += 1;
        }
        (Self { prior, stats }, encoded)
    }

    /// Encoding for inference. Unseen categories map to the prior.
    pub fn encode(&self, value: &str) -> f64 {
        self.stats
            .get(value)
            .map_or(self.prior, |s| s.encode(self.prior))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn training_encoding_only_sees_earlier_rows() {
        let values = cats(&["a", "a", "b", "a"]);
        let target = [10.0, 20.0, 5.0, 30.0];
        let (table, encoded) = CtrTable::fit_ordered(&values, &target, 1.0, &[0, 1, 2, 3]);
        assert_eq!(encoded, vec![1.0, 5.5, 1.0, 31.0 / 3.0]);
        assert_eq!(table.encode("a"), 61.0 / 4.0);
        assert_eq!(table.encode("b"), 3.0);
    }

    #[test]
    fn unseen_category_maps_to_prior() {
        let (table, _) = CtrTable::fit_ordered(&cats(&["a"]), &[4.0], 2.5, &[0]);
        assert_eq!(table.encode("never seen"), 2.5);
    }
}
