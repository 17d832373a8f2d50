//! Issue extraction and notification rows.

use std::collections::HashMap;

use effort_core::models::{IssueManifest, IssueRecord, NotificationRow};
use effort_core::{CorrectedRow, CorrectedTable};

/// Every row that needed prediction, in row order.
pub fn identify_issues(table: &CorrectedTable) -> IssueManifest {
    let records = table
        .rows
        .iter()
        .filter_map(|row| {
            row.issue_category().map(|category| IssueRecord {
                row_index: row.index,
                category,
                original: row.original,
                predicted: row.predicted,
                final_value: row.final_value,
            })
        })
        .collect();
    IssueManifest { records }
}

/// One notification row per manifest record. Missing context text becomes
/// an empty string. Records pointing at rows absent from `table` are skipped.
pub fn build_notification_rows(table: &CorrectedTable, manifest: &IssueManifest) -> Vec<NotificationRow> {
    let by_index: HashMap<usize, &CorrectedRow> = table.rows.iter().map(|r| (r.index, r)).collect();

    manifest
        .records
        .iter()
        .filter_map(|record| {
            let row = by_index.get(&record.row_index)?;
            let ctx = &row.context;
            Some(NotificationRow {
                row_index: record.row_index,
                user_email: text(&ctx.email),
                user_name: text(&ctx.user_name),
                user_id: text(&ctx.user_id),
                project_name: text(&ctx.project_name),
                task_name: text(&ctx.task_name),
                effort_date: text(&ctx.effort_date),
                original_effort: record.original,
                predicted_effort: record.predicted,
                final_effort: record.final_value,
                issue_type: record.category,
                billing_rate: ctx.billing_rate,
                effort_costs: ctx.effort_costs,
                job_title: text(&ctx.job_title),
                community: text(&ctx.community),
            })
        })
        .collect()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
