//! FeatureBuilder behaviour on realistic effort tables.

use effort_core::errors::SchemaError;
use effort_core::{Column, EffortError, Feature, RawRow, RawTable};
use effort_features::FeatureBuilder;
use proptest::prelude::*;
use test_fixtures::{effort_row, scenario_table, synthetic_table};

#[test]
fn full_table_yields_numeric_then_categorical_schema() {
    let (prepared, schema) = FeatureBuilder::new().prepare(&synthetic_table(20)).unwrap();

    assert_eq!(
        schema.names(),
        vec![
            "effortTimeCosts",
            "billingRate_hourlyRate",
            "year",
            "month",
            "day",
            "dayofweek",
            "weekofyear",
            "msg_JobTitle",
            "msg_Community",
            "taskType",
            "CountryManagerForProject",
            "Email",
        ]
    );
    assert_eq!(schema.categorical_indices(), vec![7, 8, 9, 10, 11]);
    assert_eq!(prepared.len(), 20);
    assert_eq!(prepared.feature_names(), schema.names());
    for row in prepared.rows() {
        assert_eq!(row.numeric.len(), 7);
        assert_eq!(row.categorical.len(), 5);
    }
}

#[test]
fn calendar_features_come_from_effort_date() {
    let (prepared, _) = FeatureBuilder::new().prepare(&synthetic_table(3)).unwrap();
    // Row 0 is dated 2024-01-01, a Monday in ISO week 1.
    let row = &prepared.rows()[0];
    assert_eq!(&row.numeric[2..7], &[2024.0, 1.0, 1.0, 0.0, 1.0]);
}

#[test]
fn numeric_nulls_take_the_table_median() {
    let mut rows: Vec<RawRow> = (0..5).map(|i| effort_row(i, Some(5.0))).collect();
    rows[0].billing_rate = Some(10.0);
    rows[1].billing_rate = Some(20.0);
    rows[2].billing_rate = Some(40.0);
    rows[3].billing_rate = None;
    rows[4].billing_rate = Some(f64::NAN);
    let table = RawTable::with_all_columns(rows);

    let (prepared, schema) = FeatureBuilder::new().prepare(&table).unwrap();
    assert_eq!(schema.median(Feature::BillingRate), Some(20.0));
    assert_eq!(prepared.rows()[3].numeric[1], 20.0);
    assert_eq!(prepared.rows()[4].numeric[1], 20.0);
}

#[test]
fn unparseable_dates_are_imputed() {
    let mut rows: Vec<RawRow> = (0..3).map(|i| effort_row(i, Some(5.0))).collect();
    rows[1].effort_date = Some("yesterday".into());
    let table = RawTable::with_all_columns(rows);

    let (prepared, schema) = FeatureBuilder::new().prepare(&table).unwrap();
    let year_median = schema.median(Feature::Year).unwrap();
    assert_eq!(prepared.rows()[1].numeric[2], year_median);
}

#[test]
fn missing_categories_become_unknown() {
    let mut rows: Vec<RawRow> = (0..2).map(|i| effort_row(i, Some(5.0))).collect();
    rows[0].job_title = None;
    rows[1].email = Some(String::new());
    let table = RawTable::with_all_columns(rows);

    let (prepared, _) = FeatureBuilder::new().prepare(&table).unwrap();
    assert_eq!(prepared.rows()[0].categorical[0], "Unknown");
    assert_eq!(prepared.rows()[1].categorical[4], "Unknown");
}

#[test]
fn absent_columns_shrink_the_schema() {
    let rows = (0..4).map(|i| effort_row(i, Some(5.0))).collect();
    let table = RawTable::new(
        [Column::Effort, Column::EffortTimeCosts, Column::TaskType],
        rows,
    );
    let (_, schema) = FeatureBuilder::new().prepare(&table).unwrap();
    assert_eq!(schema.names(), vec!["effortTimeCosts", "taskType"]);
}

#[test]
fn missing_target_column_is_a_schema_error() {
    let rows = (0..4).map(|i| effort_row(i, Some(5.0))).collect();
    let table = RawTable::new([Column::EffortTimeCosts, Column::Email], rows);
    let err = FeatureBuilder::new().prepare(&table).unwrap_err();
    assert!(matches!(
        err,
        EffortError::Schema(SchemaError::MissingTarget { ref column }) if column == "effortExpense"
    ));
}

#[test]
fn persisted_schema_medians_are_reused() {
    let builder = FeatureBuilder::new();
    let (_, schema) = builder.prepare(&synthetic_table(15)).unwrap();

    let mut row = effort_row(99, None);
    row.effort_time_costs = None;
    let table = RawTable::with_all_columns(vec![row]);

    let prepared = builder.prepare_with_schema(&table, &schema).unwrap();
    let expected = schema.median(Feature::EffortTimeCosts).unwrap();
    assert_eq!(prepared.rows()[0].numeric[0], expected);
    assert_eq!(prepared.rows()[0].effort, None);
}

#[test]
fn schema_mismatch_is_rejected() {
    let builder = FeatureBuilder::new();
    let (_, schema) = builder.prepare(&synthetic_table(15)).unwrap();

    let rows = (0..3).map(|i| effort_row(i, Some(5.0))).collect();
    let narrower = RawTable::new(
        Column::ALL.into_iter().filter(|c| *c != Column::Email),
        rows,
    );
    let err = builder.prepare_with_schema(&narrower, &schema).unwrap_err();
    match err {
        EffortError::Schema(SchemaError::FeatureMismatch { expected, actual }) => {
            assert_eq!(expected.len(), 12);
            assert_eq!(actual.len(), 11);
        }
        other => panic!("expected FeatureMismatch, got {other:?}"),
    }
}

#[test]
fn scenario_fixture_keeps_null_targets_and_context() {
    let (prepared, _) = FeatureBuilder::new().prepare(&scenario_table()).unwrap();
    assert_eq!(prepared.len(), 12);
    assert_eq!(prepared.labelled().count(), 10);
    assert_eq!(prepared.rows()[2].effort, None);
    assert_eq!(prepared.rows()[4].effort, Some(45.0));
    assert_eq!(
        prepared.rows()[4].context.email.as_deref(),
        Some("user0@example.com")
    );
}

proptest! {
    #[test]
    fn prepared_rows_never_contain_nulls(
        efforts in proptest::collection::vec(proptest::option::of(0.0f64..60.0), 1..30),
        drop_rates in proptest::collection::vec(any::<bool>(), 30),
    ) {
        let rows: Vec<RawRow> = efforts
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let mut row = effort_row(i, *e);
                if drop_rates[i] {
                    row.billing_rate = None;
                    row.community = None;
                }
                row
            })
            .collect();
        let table = RawTable::with_all_columns(rows);
        let (prepared, _) = FeatureBuilder::new().prepare(&table).unwrap();
        for row in prepared.rows() {
            prop_assert!(row.numeric.iter().all(|v| v.is_finite()));
            prop_assert!(row.categorical.iter().all(|c| !c.is_empty()));
        }
    }
}
