//! FeatureBuilder: raw effort table → prepared table + feature schema.

use effort_core::errors::{EffortResult, SchemaError};
use effort_core::{
    Column, Feature, FeatureSchema, PreparedRow, PreparedTable, RawRow, RawTable, RowContext,
};

use crate::calendar::{parse_effort_date, CalendarParts};
use crate::impute;

/// Derives features from raw effort tables. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Prepare a table for training. Numeric nulls are imputed with the
    /// medians of this table, which are captured in the returned schema.
    pub fn prepare(&self, table: &RawTable) -> EffortResult<(PreparedTable, FeatureSchema)> {
        require_target(table)?;
        let (numeric, categorical) = derive_features(table);
        let columns = numeric_columns(table, &numeric);
        let medians: Vec<f64> = columns.iter().map(|c| impute::column_median(c)).collect();
        let schema = FeatureSchema::new(numeric, categorical, medians)?;
        let prepared = assemble(table, &schema, &columns);

        tracing::debug!(
            rows = prepared.len(),
            features = schema.len(),
            categorical = schema.categorical_features().len(),
            "prepared training features"
        );
        Ok((prepared, schema))
    }

    /// Prepare a table against a persisted schema, imputing with the
    /// schema's training-time medians. The table must yield exactly the
    /// schema's feature list.
    pub fn prepare_with_schema(
        &self,
        table: &RawTable,
        schema: &FeatureSchema,
    ) -> EffortResult<PreparedTable> {
        require_target(table)?;
        let (numeric, categorical) = derive_features(table);
        schema.ensure_features(&numeric, &categorical)?;
        let columns = numeric_columns(table, &numeric);
        let prepared = assemble(table, schema, &columns);

        tracing::debug!(
            rows = prepared.len(),
            features = schema.len(),
            "prepared features against persisted schema"
        );
        Ok(prepared)
    }
}

fn require_target(table: &RawTable) -> Result<(), SchemaError> {
    if table.has_column(Column::Effort) {
        Ok(())
    } else {
        Err(SchemaError::MissingTarget {
            column: Column::Effort.header().to_string(),
        })
    }
}

/// Feature lists the table can supply, in schema order.
fn derive_features(table: &RawTable) -> (Vec<Feature>, Vec<Feature>) {
    let numeric = Feature::NUMERIC
        .into_iter()
        .filter(|f| table.has_column(source_column(*f)))
        .collect();
    let categorical = Feature::CATEGORICAL
        .into_iter()
        .filter(|f| table.has_column(source_column(*f)))
        .collect();
    (numeric, categorical)
}

fn source_column(feature: Feature) -> Column {
    match feature {
        Feature::EffortTimeCosts => Column::EffortTimeCosts,
        Feature::BillingRate => Column::BillingRate,
        Feature::Year
        | Feature::Month
        | Feature::Day
        | Feature::DayOfWeek
        | Feature::WeekOfYear => Column::EffortDate,
        Feature::JobTitle => Column::JobTitle,
        Feature::Community => Column::Community,
        Feature::TaskType => Column::TaskType,
        Feature::CountryManager => Column::CountryManager,
        Feature::Email => Column::Email,
    }
}

/// Raw (nullable) values of each numeric feature, column-major.
fn numeric_columns(table: &RawTable, features: &[Feature]) -> Vec<Vec<Option<f64>>> {
    let calendars: Vec<Option<CalendarParts>> = table
        .rows()
        .iter()
        .map(|row| {
            row.effort_date
                .as_deref()
                .and_then(parse_effort_date)
                .map(CalendarParts::from_date)
        })
        .collect();

    features
        .iter()
        .map(|feature| {
            table
                .rows()
                .iter()
                .zip(&calendars)
                .map(|(row, calendar)| numeric_value(*feature, row, calendar.as_ref()))
                .collect()
        })
        .collect()
}

fn numeric_value(feature: Feature, row: &RawRow, calendar: Option<&CalendarParts>) -> Option<f64> {
    match feature {
        Feature::EffortTimeCosts => row.number(Column::EffortTimeCosts),
        Feature::BillingRate => row.number(Column::BillingRate),
        Feature::Year => calendar.map(|c| c.year),
        Feature::Month => calendar.map(|c| c.month),
        Feature::Day => calendar.map(|c| c.day),
        Feature::DayOfWeek => calendar.map(|c| c.weekday),
        Feature::WeekOfYear => calendar.map(|c| c.week_of_year),
        _ => None,
    }
}

fn assemble(table: &RawTable, schema: &FeatureSchema, columns: &[Vec<Option<f64>>]) -> PreparedTable {
    let rows = table
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let numeric = columns
                .iter()
                .zip(schema.medians())
                .map(|(column, median)| impute::fill_numeric(column[index], *median))
                .collect();
            let categorical = schema
                .categorical_features()
                .iter()
                .map(|f| impute::fill_category(row.text(source_column(*f))))
                .collect();
            PreparedRow {
                index,
                effort: row.effort_value(),
                numeric,
                categorical,
                context: context_of(row),
            }
        })
        .collect();

    PreparedTable::new(
        schema.numeric_features().to_vec(),
        schema.categorical_features().to_vec(),
        rows,
    )
}

fn context_of(row: &RawRow) -> RowContext {
    RowContext {
        effort_date: row.effort_date.clone(),
        email: row.email.clone(),
        user_name: row.user_name.clone(),
        user_id: row.user_id.clone(),
        project_name: row.project_name.clone(),
        task_name: row.task_name.clone(),
        job_title: row.job_title.clone(),
        community: row.community.clone(),
        billing_rate: row.number(Column::BillingRate),
        effort_costs: row.number(Column::EffortTimeCosts),
    }
}
