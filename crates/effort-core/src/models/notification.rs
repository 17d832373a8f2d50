use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IssueCategory;

/// Flat row handed to a delivery transport for one flagged effort entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRow {
    pub row_index: usize,
    pub user_email: String,
    pub user_name: String,
    #[serde(rename = "userid")]
    pub user_id: String,
    pub project_name: String,
    pub task_name: String,
    pub effort_date: String,
    pub original_effort: Option<f64>,
    pub predicted_effort: Option<f64>,
    pub final_effort: Option<f64>,
    pub issue_type: IssueCategory,
    pub billing_rate: Option<f64>,
    pub effort_costs: Option<f64>,
    pub job_title: String,
    pub community: String,
}

/// Aggregate counts over a corrected table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_rows: usize,
    pub missing_effort_count: usize,
    pub over_limit_count: usize,
    pub predicted_count: usize,
    pub notification_count: usize,
    pub missing_percentage: f64,
    pub over_limit_percentage: f64,
    /// Missing share exceeds the configured missing-value threshold.
    pub missing_threshold_exceeded: bool,
    pub policy_violations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadMetadata {
    pub system: String,
    pub version: String,
    pub processing_required: bool,
}

/// Alert envelope for workflow or webhook transports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub summary: SummaryReport,
    pub notifications: Vec<NotificationRow>,
    pub metadata: PayloadMetadata,
}
