use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Missing,
    OverLimit,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Missing => "missing",
            IssueCategory::OverLimit => "over_limit",
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row that needed prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub row_index: usize,
    pub category: IssueCategory,
    pub original: Option<f64>,
    pub predicted: Option<f64>,
    pub final_value: Option<f64>,
}

/// Issues found in a corrected table, in row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueManifest {
    pub records: Vec<IssueRecord>,
}

impl IssueManifest {
    pub fn missing_rows(&self) -> Vec<usize> {
        self.rows_in(IssueCategory::Missing)
    }

    pub fn over_limit_rows(&self) -> Vec<usize> {
        self.rows_in(IssueCategory::OverLimit)
    }

    /// Rows whose owners should be notified.
    pub fn notification_rows(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.row_index).collect()
    }

    pub fn predicted_count(&self) -> usize {
        self.records.iter().filter(|r| r.predicted.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn rows_in(&self, category: IssueCategory) -> Vec<usize> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.row_index)
            .collect()
    }
}
