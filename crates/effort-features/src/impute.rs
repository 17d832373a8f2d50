//! Null handling for numeric and categorical features.

use effort_core::constants::{EMPTY_COLUMN_FILL, UNKNOWN_CATEGORY};
use effort_core::stats;

/// Median of the observed values, or the empty-column fill.
pub fn column_median(values: &[Option<f64>]) -> f64 {
    let observed: Vec<f64> = values.iter().flatten().copied().collect();
    stats::median(&observed).unwrap_or(EMPTY_COLUMN_FILL)
}

pub fn fill_numeric(value: Option<f64>, median: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => median,
    }
}

/// Null and blank categories become the `Unknown` sentinel.
pub fn fill_category(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => UNKNOWN_CATEGORY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_null_column_imputes_zero() {
        assert_eq!(column_median(&[None, None]), 0.0);
    }

    #[test]
    fn median_skips_nulls() {
        assert_eq!(column_median(&[Some(1.0), None, Some(5.0), Some(3.0)]), 3.0);
    }

    #[test]
    fn blank_category_is_unknown() {
        assert_eq!(fill_category(Some("  ")), "Unknown");
        assert_eq!(fill_category(None), "Unknown");
        assert_eq!(fill_category(Some("Engineer")), "Engineer");
    }
}
