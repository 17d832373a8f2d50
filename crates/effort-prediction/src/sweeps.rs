//! Ceiling validation sweeps. Pure: rows in, rows plus violations out.

use effort_core::models::{PolicyViolation, SweepPass};
use effort_core::CorrectedRow;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub rows: Vec<CorrectedRow>,
    pub violations: Vec<PolicyViolation>,
}

/// Clamp a raw model output into `[0, ceiling]`. NaN maps to 0.
pub fn clamp_to_ceiling(value: f64, ceiling: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, ceiling)
    }
}

/// Force-clamp any needs-prediction row whose predicted value exceeds the
/// ceiling, in both the predicted and the final column.
pub fn sweep_predictions(mut rows: Vec<CorrectedRow>, ceiling: f64) -> SweepOutcome {
    let mut violations = Vec::new();
    for row in rows.iter_mut().filter(|r| r.needs_prediction()) {
        let Some(predicted) = row.predicted else {
            continue;
        };
        if predicted > ceiling {
            violations.push(PolicyViolation {
                row_index: row.index,
                pass: SweepPass::Prediction,
                value: predicted,
                ceiling,
            });
            row.predicted = Some(ceiling);
            row.final_value = row.final_value.map(|v| v.min(ceiling));
        }
    }
    SweepOutcome { rows, violations }
}

/// Clamp the final column of every row to the ceiling.
pub fn sweep_final(mut rows: Vec<CorrectedRow>, ceiling: f64) -> SweepOutcome {
    let mut violations = Vec::new();
    for row in &mut rows {
        if let Some(value) = row.final_value.filter(|v| *v > ceiling) {
            violations.push(PolicyViolation {
                row_index: row.index,
                pass: SweepPass::Final,
                value,
                ceiling,
            });
            row.final_value = Some(ceiling);
        }
    }
    SweepOutcome { rows, violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effort_core::RowContext;

    fn row(index: usize, original: Option<f64>, predicted: Option<f64>, final_value: Option<f64>) -> CorrectedRow {
        CorrectedRow {
            index,
            original,
            is_missing: original.is_none(),
            is_over_limit: original.is_some_and(|v| v > 30.0),
            predicted,
            final_value,
            context: RowContext::default(),
        }
    }

    #[test]
    fn clamp_bounds_and_nan() {
        assert_eq!(clamp_to_ceiling(-3.0, 30.0), 0.0);
        assert_eq!(clamp_to_ceiling(31.0, 30.0), 30.0);
        assert_eq!(clamp_to_ceiling(12.5, 30.0), 12.5);
        assert_eq!(clamp_to_ceiling(f64::NAN, 30.0), 0.0);
    }

    #[test]
    fn prediction_sweep_only_touches_rows_needing_prediction() {
        let rows = vec![
            row(0, None, Some(35.0), Some(35.0)),
            row(1, Some(20.0), Some(20.0), Some(20.0)),
            row(2, Some(40.0), Some(33.0), Some(30.0)),
        ];
        let out = sweep_predictions(rows, 30.0);
        assert_eq!(out.violations.len(), 2);
        assert_eq!(out.rows[0].predicted, Some(30.0));
        assert_eq!(out.rows[0].final_value, Some(30.0));
        assert_eq!(out.rows[1].final_value, Some(20.0));
        assert_eq!(out.rows[2].predicted, Some(30.0));
        assert!(out.violations.iter().all(|v| v.pass == SweepPass::Prediction));
    }

    #[test]
    fn final_sweep_clamps_every_row() {
        let rows = vec![
            row(0, Some(10.0), Some(10.0), Some(31.0)),
            row(1, Some(10.0), Some(10.0), Some(10.0)),
        ];
        let out = sweep_final(rows, 30.0);
        assert_eq!(out.rows[0].final_value, Some(30.0));
        assert_eq!(out.rows[1].final_value, Some(10.0));
        assert_eq!(out.violations.len(), 1);
        assert_eq!(out.violations[0].value, 31.0);
        assert_eq!(out.violations[0].pass, SweepPass::Final);
    }
}
