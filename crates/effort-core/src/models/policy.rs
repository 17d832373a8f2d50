use serde::{Deserialize, Serialize};

/// Which validation sweep detected a breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepPass {
    /// Predicted column of rows needing prediction.
    Prediction,
    /// Final column of every row.
    Final,
}

/// A ceiling breach that was detected and clamped. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyViolation {
    pub row_index: usize,
    pub pass: SweepPass,
    /// Value before clamping.
    pub value: f64,
    pub ceiling: f64,
}
