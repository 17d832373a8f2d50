//! ConstrainedPredictor invariants on trained fixture models.

use std::sync::OnceLock;

use effort_core::config::BoostingConfig;
use effort_core::errors::SchemaError;
use effort_core::{Column, EffortError, PreparedTable, RawTable};
use effort_features::FeatureBuilder;
use effort_prediction::{sweep_final, sweep_predictions, ConstrainedPredictor};
use effort_training::{ModelArtifact, TrainOptions, TrainingPipeline};
use proptest::prelude::*;
use test_fixtures::{effort_row, scenario_table, synthetic_table, table_with_efforts};

const CEILING: f64 = 30.0;

fn train_artifact(raw: &RawTable) -> ModelArtifact {
    let (table, schema) = FeatureBuilder::new().prepare(raw).unwrap();
    let pipeline = TrainingPipeline::new(
        BoostingConfig {
            iterations: 60,
            depth: 4,
            ..BoostingConfig::default()
        },
        2,
        1,
    );
    let options = TrainOptions {
        ceiling: CEILING,
        test_fraction: 0.2,
        hyperparameter_tuning: false,
        fast_mode: true,
    };
    let trained = pipeline.train(&table, &options).unwrap();
    ModelArtifact::new(trained, schema, CEILING)
}

/// Model trained once on a synthetic table, shared by the property tests.
fn shared_artifact() -> &'static ModelArtifact {
    static ARTIFACT: OnceLock<ModelArtifact> = OnceLock::new();
    ARTIFACT.get_or_init(|| train_artifact(&synthetic_table(40)))
}

fn prepare_for(artifact: &ModelArtifact, raw: &RawTable) -> PreparedTable {
    FeatureBuilder::new()
        .prepare_with_schema(raw, &artifact.schema)
        .unwrap()
}

#[test]
fn scenario_twelve_rows() {
    let raw = scenario_table();
    let artifact = train_artifact(&raw);
    let table = prepare_for(&artifact, &raw);
    let corrected = ConstrainedPredictor::new().predict(&artifact, &table).unwrap();

    assert_eq!(corrected.len(), 12);
    assert!(corrected.violations.is_empty());

    for index in [2, 7] {
        let row = &corrected.rows[index];
        assert!(row.is_missing && !row.is_over_limit);
        let value = row.final_value.unwrap();
        assert!((0.0..=CEILING).contains(&value));
        assert_eq!(row.predicted, row.final_value);
    }

    let over = &corrected.rows[4];
    assert!(over.is_over_limit);
    assert_eq!(over.original, Some(45.0));
    assert_eq!(over.final_value, Some(CEILING));
    assert!(over.predicted.unwrap() <= CEILING);

    let untouched: Vec<usize> = (0..12).filter(|i| ![2, 4, 7].contains(i)).collect();
    assert_eq!(untouched.len(), 9);
    for index in untouched {
        let row = &corrected.rows[index];
        assert!(!row.needs_prediction());
        assert_eq!(row.final_value, row.original);
        assert_eq!(row.predicted, row.original);
    }
}

#[test]
fn prediction_is_deterministic() {
    let artifact = shared_artifact();
    let raw = table_with_efforts(&[None, Some(50.0), Some(3.0), None]);
    let table = prepare_for(artifact, &raw);
    let predictor = ConstrainedPredictor::new();
    let a = predictor.predict(artifact, &table).unwrap();
    let b = predictor.predict(artifact, &table).unwrap();
    assert_eq!(a, b);
}

#[test]
fn feature_mismatch_is_a_schema_error() {
    let artifact = shared_artifact();
    let rows = (0..3).map(|i| effort_row(i, None)).collect();
    let narrower = RawTable::new(
        Column::ALL.into_iter().filter(|c| *c != Column::TaskType),
        rows,
    );
    let (table, _) = FeatureBuilder::new().prepare(&narrower).unwrap();
    let err = ConstrainedPredictor::new().predict(artifact, &table).unwrap_err();
    assert!(matches!(
        err,
        EffortError::Schema(SchemaError::FeatureMismatch { .. })
    ));
}

#[test]
fn context_is_carried_through() {
    let artifact = shared_artifact();
    let table = prepare_for(artifact, &table_with_efforts(&[None]));
    let corrected = ConstrainedPredictor::new().predict(artifact, &table).unwrap();
    assert_eq!(corrected.rows[0].context.email.as_deref(), Some("user0@example.com"));
    assert_eq!(corrected.rows[0].context.task_name.as_deref(), Some("Task 0"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ceiling_passthrough_and_truncation_hold(
        efforts in proptest::collection::vec(proptest::option::of(-5.0f64..80.0), 1..25),
    ) {
        let artifact = shared_artifact();
        let table = prepare_for(artifact, &table_with_efforts(&efforts));
        let corrected = ConstrainedPredictor::new().predict(artifact, &table).unwrap();

        prop_assert_eq!(corrected.rows.len(), efforts.len());
        for (row, effort) in corrected.rows.iter().zip(&efforts) {
            let final_value = row.final_value.unwrap();
            prop_assert!(final_value <= CEILING);
            match effort {
                Some(v) if *v > CEILING => prop_assert_eq!(final_value, CEILING),
                Some(v) => prop_assert_eq!(final_value, *v),
                None => prop_assert!(final_value >= 0.0),
            }
        }
    }

    #[test]
    fn sweeps_leave_no_value_above_ceiling(
        values in proptest::collection::vec((proptest::option::of(0.0f64..60.0), 0.0f64..90.0, 0.0f64..90.0), 1..40),
    ) {
        let rows = values
            .iter()
            .enumerate()
            .map(|(index, (original, predicted, final_value))| effort_core::CorrectedRow {
                index,
                original: *original,
                is_missing: original.is_none(),
                is_over_limit: original.is_some_and(|v| v > CEILING),
                predicted: Some(*predicted),
                final_value: Some(*final_value),
                context: Default::default(),
            })
            .collect();
        let first = sweep_predictions(rows, CEILING);
        let second = sweep_final(first.rows, CEILING);
        let above = values.iter().filter(|(_, _, f)| *f > CEILING).count();

        prop_assert!(second.rows.iter().all(|r| r.final_value.unwrap() <= CEILING));
        prop_assert!(second.violations.len() <= above);
    }
}
