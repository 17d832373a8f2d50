//! Tests for the effort configuration system.

use std::collections::HashMap;
use std::sync::Mutex;

use effort_core::config::{BootstrapKind, ConfigOverrides, EffortConfig};
use effort_core::errors::ConfigError;

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 9] = [
    "EFFORT_CEILING",
    "EFFORT_MISSING_THRESHOLD",
    "EFFORT_TEST_FRACTION",
    "EFFORT_FAST_MODE",
    "EFFORT_TUNING",
    "EFFORT_WORKERS",
    "EFFORT_DB_PATH",
    "EFFORT_ARTIFACT_DIR",
    "EFFORT_LOG_LEVEL",
];

fn clear_effort_env_vars() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_match_documented_values() {
    let config = EffortConfig::default();
    assert_eq!(config.limits.effort_ceiling, 30.0);
    assert_eq!(config.limits.missing_value_threshold, 0.1);
    assert_eq!(config.training.test_fraction, 0.2);
    assert!(config.training.fast_mode);
    assert!(!config.training.hyperparameter_tuning);
    assert_eq!(config.boosting.iterations, 200);
    assert_eq!(config.boosting.depth, 6);
    assert_eq!(config.boosting.learning_rate, 0.1);
    assert_eq!(config.boosting.bootstrap, BootstrapKind::Bernoulli);
    assert_eq!(config.boosting.early_stopping_rounds, 20);
    assert_eq!(config.boosting.seed, 42);
    assert_eq!(config.storage.db_path, "models.db");
    assert!(config.validate().is_ok());
}

#[test]
fn layered_resolution_prefers_overrides_then_env_then_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_effort_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("effort.toml"),
        r#"
[limits]
effort_ceiling = 24.0
missing_value_threshold = 0.3

[training]
workers = 2
"#,
    )
    .unwrap();

    std::env::set_var("EFFORT_CEILING", "20");
    std::env::set_var("EFFORT_WORKERS", "3");

    let overrides = ConfigOverrides {
        workers: Some(8),
        ..Default::default()
    };
    let config = EffortConfig::load(dir.path(), Some(&overrides)).unwrap();

    assert_eq!(config.limits.effort_ceiling, 20.0);
    assert_eq!(config.limits.missing_value_threshold, 0.3);
    assert_eq!(config.training.workers, 8);

    clear_effort_env_vars();
}

#[test]
fn load_without_project_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_effort_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = EffortConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.limits.effort_ceiling, 30.0);
    assert_eq!(config.storage.artifact_dir, "models");
}

#[test]
fn env_lookup_ignores_unparseable_values() {
    let vars: HashMap<&str, &str> = [
        ("EFFORT_CEILING", "not-a-number"),
        ("EFFORT_FAST_MODE", "false"),
        ("EFFORT_DB_PATH", "/tmp/registry.db"),
    ]
    .into_iter()
    .collect();

    let mut config = EffortConfig::default();
    config.apply_env_with(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.limits.effort_ceiling, 30.0);
    assert!(!config.training.fast_mode);
    assert_eq!(config.storage.db_path, "/tmp/registry.db");
}

#[test]
fn partial_toml_keeps_defaults_for_missing_keys() {
    let config = EffortConfig::from_toml(
        r#"
[boosting]
depth = 4
bootstrap = "bayesian"
"#,
    )
    .unwrap();
    assert_eq!(config.boosting.depth, 4);
    assert_eq!(config.boosting.bootstrap, BootstrapKind::Bayesian);
    assert_eq!(config.boosting.iterations, 200);
    assert_eq!(config.limits.effort_ceiling, 30.0);
}

#[test]
fn toml_round_trip_preserves_values() {
    let mut config = EffortConfig::default();
    config.limits.effort_ceiling = 12.5;
    config.boosting.bootstrap = BootstrapKind::No;
    let text = config.to_toml().unwrap();
    let parsed = EffortConfig::from_toml(&text).unwrap();
    assert_eq!(parsed.limits.effort_ceiling, 12.5);
    assert_eq!(parsed.boosting, config.boosting);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = EffortConfig::from_toml("[limits\neffort_ceiling = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_bad_values() {
    let cases: Vec<(&str, Box<dyn Fn(&mut EffortConfig)>)> = vec![
        ("limits.effort_ceiling", Box::new(|c| c.limits.effort_ceiling = 0.0)),
        ("limits.effort_ceiling", Box::new(|c| c.limits.effort_ceiling = f64::INFINITY)),
        (
            "limits.missing_value_threshold",
            Box::new(|c| c.limits.missing_value_threshold = 1.5),
        ),
        ("training.test_fraction", Box::new(|c| c.training.test_fraction = 1.0)),
        ("training.cv_folds", Box::new(|c| c.training.cv_folds = 1)),
        ("boosting.iterations", Box::new(|c| c.boosting.iterations = 0)),
        ("boosting.depth", Box::new(|c| c.boosting.depth = 17)),
        ("boosting.learning_rate", Box::new(|c| c.boosting.learning_rate = 0.0)),
        ("boosting.subsample", Box::new(|c| c.boosting.subsample = 1.2)),
        ("storage.read_pool_size", Box::new(|c| c.storage.read_pool_size = 0)),
    ];

    for (expected_field, mutate) in cases {
        let mut config = EffortConfig::default();
        mutate(&mut config);
        match config.validate() {
            Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected validation failure for {expected_field}, got {other:?}"),
        }
    }
}
