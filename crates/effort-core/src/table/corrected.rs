use serde::{Deserialize, Serialize};

use super::RowContext;
use crate::models::{IssueCategory, PolicyViolation};

/// A row after constrained prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedRow {
    pub index: usize,
    /// Effort as supplied, null when missing.
    pub original: Option<f64>,
    pub is_missing: bool,
    pub is_over_limit: bool,
    /// Model output for rows needing prediction, else the original value.
    pub predicted: Option<f64>,
    /// Value to use downstream. Always `<= ceiling` once predicted.
    pub final_value: Option<f64>,
    pub context: RowContext,
}

impl CorrectedRow {
    pub fn needs_prediction(&self) -> bool {
        self.is_missing || self.is_over_limit
    }

    pub fn issue_category(&self) -> Option<IssueCategory> {
        if self.is_missing {
            Some(IssueCategory::Missing)
        } else if self.is_over_limit {
            Some(IssueCategory::OverLimit)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedTable {
    pub ceiling: f64,
    pub rows: Vec<CorrectedRow>,
    /// Ceiling breaches found and clamped by the validation sweeps.
    pub violations: Vec<PolicyViolation>,
}

impl CorrectedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn final_values(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.final_value).collect()
    }

    pub fn max_final(&self) -> Option<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.final_value)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
    }
}
