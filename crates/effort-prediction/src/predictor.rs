//! ConstrainedPredictor: artifact + prepared table → corrected table.

use effort_core::errors::EffortResult;
use effort_core::{CorrectedRow, CorrectedTable, PreparedRow, PreparedTable};
use effort_observability::events;
use effort_training::ModelArtifact;

use crate::sweeps::{clamp_to_ceiling, sweep_final, sweep_predictions};

/// Fills missing efforts and truncates over-limit efforts with model
/// predictions, never emitting a final value above the artifact's ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstrainedPredictor;

impl ConstrainedPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Rows with an effort at or below the ceiling pass through unchanged.
    /// Missing rows get the clamped prediction; over-limit rows keep the
    /// clamped prediction for reference and are truncated to the ceiling.
    pub fn predict(&self, artifact: &ModelArtifact, table: &PreparedTable) -> EffortResult<CorrectedTable> {
        artifact.ensure_compatible(table)?;
        let ceiling = artifact.ceiling;
        let _span = effort_observability::prediction_span!(table.len(), ceiling).entered();

        let rows = table
            .rows()
            .iter()
            .map(|row| correct_row(artifact, row, ceiling))
            .collect::<EffortResult<Vec<_>>>()?;
        let predicted = rows.iter().filter(|r| r.needs_prediction()).count();

        let pass_two = sweep_predictions(rows, ceiling);
        let pass_three = sweep_final(pass_two.rows, ceiling);
        let mut violations = pass_two.violations;
        violations.extend(pass_three.violations);
        for violation in &violations {
            events::policy_violation(violation);
        }
        events::prediction_completed(table.len(), predicted, violations.len());

        Ok(CorrectedTable {
            ceiling,
            rows: pass_three.rows,
            violations,
        })
    }
}

fn correct_row(artifact: &ModelArtifact, row: &PreparedRow, ceiling: f64) -> EffortResult<CorrectedRow> {
    let original = row.effort.filter(|v| !v.is_nan());
    let is_missing = original.is_none();
    let is_over_limit = original.is_some_and(|v| v > ceiling);

    let (predicted, final_value) = if is_missing || is_over_limit {
        let clamped = clamp_to_ceiling(artifact.predict_row(row)?, ceiling);
        if is_missing {
            (Some(clamped), Some(clamped))
        } else {
            (Some(clamped), Some(ceiling))
        }
    } else {
        (original, original)
    };

    Ok(CorrectedRow {
        index: row.index,
        original,
        is_missing,
        is_over_limit,
        predicted,
        final_value,
        context: row.context.clone(),
    })
}
