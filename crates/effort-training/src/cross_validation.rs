//! K-fold cross-validation of boosting parameters on a prepared table.

use effort_core::config::BoostingConfig;
use effort_core::constants::DEFAULT_SEED;
use effort_core::errors::{EffortError, EffortResult};
use effort_core::models::CrossValidationReport;
use effort_core::{stats, PreparedTable};

use crate::boosting::BoostingTrainer;
use crate::dataset::Dataset;
use crate::metrics;
use crate::scaler::StandardScaler;
use crate::split::k_fold;

/// Shuffled k-fold RMSE over the labelled rows of `table`, targets capped at
/// `ceiling`. The scaler is refit on each training fold.
pub fn cross_validate(
    table: &PreparedTable,
    ceiling: f64,
    params: &BoostingConfig,
    folds: usize,
) -> EffortResult<CrossValidationReport> {
    if folds < 2 {
        return Err(EffortError::InvalidInput {
            reason: format!("cross-validation needs at least 2 folds, got {folds}"),
        });
    }
    let mut data = Dataset::from_labelled(table);
    if data.len() < folds {
        return Err(EffortError::InsufficientData {
            available: data.len(),
            required: folds,
        });
    }
    data.cap_target(ceiling);

    let trainer = BoostingTrainer::new(params.clone())?;
    let mut fold_rmse = Vec::with_capacity(folds);
    for fold in k_fold(data.len(), folds, Some(DEFAULT_SEED)) {
        let mut fit_set = data.subset(&fold.train);
        let mut holdout = data.subset(&fold.validation);
        let scaler = StandardScaler::fit(&fit_set.numeric);
        scaler.transform_dataset(&mut fit_set)?;
        scaler.transform_dataset(&mut holdout)?;

        let model = trainer.fit(&fit_set, None);
        let predictions = holdout
            .numeric
            .iter()
            .zip(&holdout.categorical)
            .map(|(n, c)| model.predict(n, c))
            .collect::<Result<Vec<f64>, _>>()?;
        fold_rmse.push(metrics::rmse(&holdout.target, &predictions));
    }

    let report = CrossValidationReport {
        folds,
        mean_rmse: stats::mean(&fold_rmse),
        std_rmse: stats::std_dev(&fold_rmse),
        fold_rmse,
    };
    tracing::info!(
        folds,
        mean_rmse = report.mean_rmse,
        std_rmse = report.std_rmse,
        "cross-validation completed"
    );
    Ok(report)
}
