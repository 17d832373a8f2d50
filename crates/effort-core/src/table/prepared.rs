use serde::{Deserialize, Serialize};

use crate::schema::Feature;

/// Raw values carried alongside a row for notifications. Never features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowContext {
    pub effort_date: Option<String>,
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub user_id: Option<String>,
    pub project_name: Option<String>,
    pub task_name: Option<String>,
    pub job_title: Option<String>,
    pub community: Option<String>,
    pub billing_rate: Option<f64>,
    pub effort_costs: Option<f64>,
}

/// A row after feature preparation: no nulls in `numeric` or `categorical`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedRow {
    /// Position in the source table.
    pub index: usize,
    pub effort: Option<f64>,
    /// Aligned with [`PreparedTable::numeric_features`].
    pub numeric: Vec<f64>,
    /// Aligned with [`PreparedTable::categorical_features`].
    pub categorical: Vec<String>,
    pub context: RowContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedTable {
    numeric_features: Vec<Feature>,
    categorical_features: Vec<Feature>,
    rows: Vec<PreparedRow>,
}

impl PreparedTable {
    pub fn new(
        numeric_features: Vec<Feature>,
        categorical_features: Vec<Feature>,
        rows: Vec<PreparedRow>,
    ) -> Self {
        Self {
            numeric_features,
            categorical_features,
            rows,
        }
    }

    pub fn numeric_features(&self) -> &[Feature] {
        &self.numeric_features
    }

    pub fn categorical_features(&self) -> &[Feature] {
        &self.categorical_features
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.numeric_features
            .iter()
            .chain(self.categorical_features.iter())
            .map(|f| f.name().to_string())
            .collect()
    }

    pub fn rows(&self) -> &[PreparedRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<PreparedRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with a usable (non-null, finite) effort value.
    pub fn labelled(&self) -> impl Iterator<Item = &PreparedRow> {
        self.rows
            .iter()
            .filter(|r| r.effort.is_some_and(f64::is_finite))
    }
}
