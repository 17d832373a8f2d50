//! Summary report and notification payload.

use chrono::Utc;
use effort_core::models::{
    IssueManifest, NotificationPayload, NotificationRow, PayloadMetadata, SummaryReport,
};
use effort_core::CorrectedTable;

pub const PAYLOAD_EVENT_TYPE: &str = "effort_expense_alert";
pub const PAYLOAD_SYSTEM: &str = "effort_expense_management";
pub const PAYLOAD_VERSION: &str = "1.0";

/// Counts and shares over a corrected table. `missing_threshold` is the
/// fraction of missing rows above which the batch is flagged.
pub fn summary_report(
    table: &CorrectedTable,
    manifest: &IssueManifest,
    missing_threshold: f64,
) -> SummaryReport {
    let total = table.len();
    let missing = table.rows.iter().filter(|r| r.is_missing).count();
    let over_limit = table.rows.iter().filter(|r| r.is_over_limit).count();
    let share = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };

    SummaryReport {
        total_rows: total,
        missing_effort_count: missing,
        over_limit_count: over_limit,
        predicted_count: manifest.predicted_count(),
        notification_count: manifest.len(),
        missing_percentage: share(missing) * 100.0,
        over_limit_percentage: share(over_limit) * 100.0,
        missing_threshold_exceeded: share(missing) > missing_threshold,
        policy_violations: table.violations.len(),
    }
}

/// Wrap rows and summary in the alert envelope consumed by delivery transports.
pub fn notification_payload(
    notifications: Vec<NotificationRow>,
    summary: SummaryReport,
) -> NotificationPayload {
    NotificationPayload {
        event_type: PAYLOAD_EVENT_TYPE.to_string(),
        timestamp: Utc::now(),
        summary,
        notifications,
        metadata: PayloadMetadata {
            system: PAYLOAD_SYSTEM.to_string(),
            version: PAYLOAD_VERSION.to_string(),
            processing_required: true,
        },
    }
}
