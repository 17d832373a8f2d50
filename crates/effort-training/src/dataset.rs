//! Row-major training data extracted from a prepared table.

use effort_core::PreparedTable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub numeric: Vec<Vec<f64>>,
    pub categorical: Vec<Vec<String>>,
    pub target: Vec<f64>,
}

impl Dataset {
    /// Rows of `table` with a usable effort value.
    pub fn from_labelled(table: &PreparedTable) -> Self {
        let mut dataset = Self::default();
        for row in table.labelled() {
            dataset.numeric.push(row.numeric.clone());
            dataset.categorical.push(row.categorical.clone());
            dataset.target.push(row.effort.unwrap_or_default());
        }
        dataset
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    pub fn numeric_width(&self) -> usize {
        self.numeric.first().map_or(0, Vec::len)
    }

    pub fn categorical_width(&self) -> usize {
        self.categorical.first().map_or(0, Vec::len)
    }

    /// Rows at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            numeric: indices.iter().map(|&i| self.numeric[i].clone()).collect(),
            categorical: indices.iter().map(|&i| self.categorical[i].clone()).collect(),
            target: indices.iter().map(|&i| self.target[i]).collect(),
        }
    }

    /// Keep only the rows for which `keep` returns true.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        let indices: Vec<usize> = (0..self.len()).filter(|&i| keep[i]).collect();
        *self = self.subset(&indices);
    }

    /// Clip every target to at most `ceiling`.
    pub fn cap_target(&mut self, ceiling: f64) {
        for y in &mut self.target {
            *y = y.min(ceiling);
        }
    }
}
