//! Trained ensemble used at inference.

use effort_core::errors::SchemaError;
use serde::{Deserialize, Serialize};

use super::ctr::CtrTable;
use super::tree::ObliviousTree;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedModel {
    /// Starting prediction (mean training target).
    pub base_score: f64,
    pub n_numeric: usize,
    /// One table per categorical feature, in schema order.
    pub ctr_tables: Vec<CtrTable>,
    pub trees: Vec<ObliviousTree>,
    /// Share of total split gain per feature (numeric then categorical), summing to 100.
    pub feature_importance: Vec<f64>,
}

impl BoostedModel {
    /// Predict from scaled numeric values and raw categories.
    pub fn predict(&self, numeric: &[f64], categorical: &[String]) -> Result<f64, SchemaError> {
        let features = self.encode(numeric, categorical)?;
        Ok(self.predict_encoded(&features))
    }

    pub(crate) fn predict_encoded(&self, features: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.predict(features)).sum::<f64>()
    }

    /// Dense feature vector: numeric values then category encodings.
    pub(crate) fn encode(&self, numeric: &[f64], categorical: &[String]) -> Result<Vec<f64>, SchemaError> {
        let expected = self.n_numeric + self.ctr_tables.len();
        let actual = numeric.len() + categorical.len();
        if numeric.len() != self.n_numeric || categorical.len() != self.ctr_tables.len() {
            return Err(SchemaError::WidthMismatch { expected, actual });
        }
        let mut features = Vec::with_capacity(expected);
        features.extend_from_slice(numeric);
        features.extend(
            self.ctr_tables
                .iter()
                .zip(categorical)
                .map(|(table, value)| table.encode(value)),
        );
        Ok(features)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_numeric + self.ctr_tables.len()
    }
}
