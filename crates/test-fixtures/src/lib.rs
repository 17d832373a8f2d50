//! Test fixture loader and deterministic effort-table generators.
//!
//! JSON fixtures live in this crate's `data/` directory and are loaded as
//! records keyed by column header, the same shape exported effort tables use.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use effort_core::{RawRow, RawTable};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const JOB_TITLES: [&str; 3] = ["Engineer", "Designer", "Analyst"];
const COMMUNITIES: [&str; 2] = ["Platform", "Data"];
const TASK_TYPES: [&str; 3] = ["Development", "Review", "Meeting"];
const MANAGERS: [&str; 2] = ["Alice Keller", "Bruno Stark"];

/// Root directory of the JSON fixtures.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture of JSON records as a raw effort table.
pub fn load_table(relative_path: &str) -> RawTable {
    let records: Vec<Map<String, Value>> = load_fixture(relative_path);
    RawTable::from_records(&records)
}

/// 12 rows: two with a null effort (rows 2 and 7), one at 45 hours
/// (row 4), the rest between 5.5 and 8.5 hours.
pub fn scenario_table() -> RawTable {
    load_table("scenario_12_rows.json")
}

/// Deterministic fully populated row. Effort is derived from the row index
/// and tracks `effortTimeCosts / billingRate_hourlyRate`.
pub fn effort_row(i: usize, effort: Option<f64>) -> RawRow {
    let rate = 50.0 + (i % 5) as f64 * 10.0;
    let hours = base_hours(i);
    let date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .map(|d| d + Duration::days(i as i64))
        .map(|d| d.format("%Y-%m-%d").to_string());

    RawRow {
        effort,
        effort_date: date,
        effort_time_costs: Some(hours * rate),
        billing_rate: Some(rate),
        job_title: Some(JOB_TITLES[i % JOB_TITLES.len()].to_string()),
        community: Some(COMMUNITIES[i % COMMUNITIES.len()].to_string()),
        task_type: Some(TASK_TYPES[i % TASK_TYPES.len()].to_string()),
        country_manager: Some(MANAGERS[i % MANAGERS.len()].to_string()),
        email: Some(format!("user{}@example.com", i % 4)),
        user_name: Some(format!("User {}", i % 4)),
        user_id: Some(format!("U-{}", 1000 + i % 4)),
        project_name: Some(format!("Project {}", i % 3)),
        task_name: Some(format!("Task {i}")),
    }
}

/// Hours in 4.0..=8.0 following a fixed pattern.
pub fn base_hours(i: usize) -> f64 {
    4.0 + ((i * 7) % 9) as f64 * 0.5
}

/// `n` labelled rows with efforts from [`base_hours`].
pub fn synthetic_table(n: usize) -> RawTable {
    RawTable::with_all_columns((0..n).map(|i| effort_row(i, Some(base_hours(i)))).collect())
}

/// One row per entry of `efforts`, all other columns populated.
pub fn table_with_efforts(efforts: &[Option<f64>]) -> RawTable {
    RawTable::with_all_columns(
        efforts
            .iter()
            .enumerate()
            .map(|(i, e)| effort_row(i, *e))
            .collect(),
    )
}
