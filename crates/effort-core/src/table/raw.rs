use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Column;

/// One input record. Every field is nullable; which columns the table
/// actually declares is tracked by [`RawTable`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub effort: Option<f64>,
    pub effort_date: Option<String>,
    pub effort_time_costs: Option<f64>,
    pub billing_rate: Option<f64>,
    pub job_title: Option<String>,
    pub community: Option<String>,
    pub task_type: Option<String>,
    pub country_manager: Option<String>,
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub user_id: Option<String>,
    pub project_name: Option<String>,
    pub task_name: Option<String>,
}

impl RawRow {
    /// Effort value with NaN treated as null.
    pub fn effort_value(&self) -> Option<f64> {
        self.effort.filter(|v| !v.is_nan())
    }

    pub fn text(&self, column: Column) -> Option<&str> {
        let value = match column {
            Column::EffortDate => &self.effort_date,
            Column::JobTitle => &self.job_title,
            Column::Community => &self.community,
            Column::TaskType => &self.task_type,
            Column::CountryManager => &self.country_manager,
            Column::Email => &self.email,
            Column::UserName => &self.user_name,
            Column::UserId => &self.user_id,
            Column::ProjectName => &self.project_name,
            Column::TaskName => &self.task_name,
            Column::Effort | Column::EffortTimeCosts | Column::BillingRate => return None,
        };
        value.as_deref()
    }

    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::Effort => self.effort_value(),
            Column::EffortTimeCosts => self.effort_time_costs,
            Column::BillingRate => self.billing_rate,
            _ => None,
        }
        .filter(|v| v.is_finite())
    }

    fn set(&mut self, column: Column, value: &Value) {
        match column {
            Column::Effort => self.effort = as_number(value),
            Column::EffortTimeCosts => self.effort_time_costs = as_number(value),
            Column::BillingRate => self.billing_rate = as_number(value),
            Column::EffortDate => self.effort_date = as_text(value),
            Column::JobTitle => self.job_title = as_text(value),
            Column::Community => self.community = as_text(value),
            Column::TaskType => self.task_type = as_text(value),
            Column::CountryManager => self.country_manager = as_text(value),
            Column::Email => self.email = as_text(value),
            Column::UserName => self.user_name = as_text(value),
            Column::UserId => self.user_id = as_text(value),
            Column::ProjectName => self.project_name = as_text(value),
            Column::TaskName => self.task_name = as_text(value),
        }
    }
}

/// Input table: the declared column set plus its rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: BTreeSet<Column>,
    rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: impl IntoIterator<Item = Column>, rows: Vec<RawRow>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    /// Table declaring every known column.
    pub fn with_all_columns(rows: Vec<RawRow>) -> Self {
        Self::new(Column::ALL, rows)
    }

    /// Build a table from JSON records keyed by column header.
    ///
    /// A column is declared when any record carries its header. Unknown keys
    /// are ignored. Numbers given as strings are parsed; anything
    /// unparseable becomes null.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut columns = BTreeSet::new();
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let mut row = RawRow::default();
            for (key, value) in record {
                if let Some(column) = Column::from_header(key) {
                    columns.insert(column);
                    row.set(column, value);
                }
            }
            rows.push(row);
        }
        Self { columns, rows }
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn push(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose effort value is present.
    pub fn labelled_count(&self) -> usize {
        self.rows.iter().filter(|r| r.effort_value().is_some()).count()
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| !v.is_nan())
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
