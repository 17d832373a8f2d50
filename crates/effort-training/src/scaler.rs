//! Standard scaling of numeric features.

use effort_core::errors::SchemaError;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Per-feature `(x - mean) / std` with population std. A zero std scales by 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let n = rows.len().max(1) as f64;
        let mut means = vec![0.0; width];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        means.iter_mut().for_each(|m| *m /= n);

        let mut scales = vec![0.0; width];
        for row in rows {
            for ((s, v), m) in scales.iter_mut().zip(row).zip(&means) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut scales {
            let std = (*s / n).sqrt();
            *s = if std > 0.0 && std.is_finite() { std } else { 1.0 };
        }
        Self { means, scales }
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }

    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, SchemaError> {
        if row.len() != self.width() {
            return Err(SchemaError::WidthMismatch {
                expected: self.width(),
                actual: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    /// Scale the numeric block of every row in place.
    pub fn transform_dataset(&self, dataset: &mut Dataset) -> Result<(), SchemaError> {
        for row in &mut dataset.numeric {
            *row = self.transform(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_column_scales_by_one() {
        let scaler = StandardScaler::fit(&[vec![5.0, 1.0], vec![5.0, 3.0]]);
        assert_eq!(scaler.transform(&[5.0, 3.0]).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn uses_population_std() {
        let scaler = StandardScaler::fit(&[vec![2.0], vec![4.0], vec![4.0], vec![4.0], vec![5.0], vec![5.0], vec![7.0], vec![9.0]]);
        // mean 5, population std 2
        assert_eq!(scaler.transform(&[9.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0]]);
        assert!(matches!(
            scaler.transform(&[1.0]),
            Err(SchemaError::WidthMismatch { expected: 2, actual: 1 })
        ));
    }
}
