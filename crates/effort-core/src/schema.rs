//! Feature schema shared between training and prediction.
//!
//! The schema is fixed when a model is trained and persisted inside its
//! artifact. Prediction must present exactly the same feature list; any
//! difference is a [`SchemaError::FeatureMismatch`](crate::errors::SchemaError).

use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;

/// A model input feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "effortTimeCosts")]
    EffortTimeCosts,
    #[serde(rename = "billingRate_hourlyRate")]
    BillingRate,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "dayofweek")]
    DayOfWeek,
    #[serde(rename = "weekofyear")]
    WeekOfYear,
    #[serde(rename = "msg_JobTitle")]
    JobTitle,
    #[serde(rename = "msg_Community")]
    Community,
    #[serde(rename = "taskType")]
    TaskType,
    #[serde(rename = "CountryManagerForProject")]
    CountryManager,
    #[serde(rename = "Email")]
    Email,
}

impl Feature {
    /// Numeric features in schema order.
    pub const NUMERIC: [Feature; 7] = [
        Feature::EffortTimeCosts,
        Feature::BillingRate,
        Feature::Year,
        Feature::Month,
        Feature::Day,
        Feature::DayOfWeek,
        Feature::WeekOfYear,
    ];

    /// Categorical features in schema order.
    pub const CATEGORICAL: [Feature; 5] = [
        Feature::JobTitle,
        Feature::Community,
        Feature::TaskType,
        Feature::CountryManager,
        Feature::Email,
    ];

    /// Calendar features derived from the effort date.
    pub const CALENDAR: [Feature; 5] = [
        Feature::Year,
        Feature::Month,
        Feature::Day,
        Feature::DayOfWeek,
        Feature::WeekOfYear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::EffortTimeCosts => "effortTimeCosts",
            Feature::BillingRate => "billingRate_hourlyRate",
            Feature::Year => "year",
            Feature::Month => "month",
            Feature::Day => "day",
            Feature::DayOfWeek => "dayofweek",
            Feature::WeekOfYear => "weekofyear",
            Feature::JobTitle => "msg_JobTitle",
            Feature::Community => "msg_Community",
            Feature::TaskType => "taskType",
            Feature::CountryManager => "CountryManagerForProject",
            Feature::Email => "Email",
        }
    }

    pub fn is_categorical(&self) -> bool {
        Self::CATEGORICAL.contains(self)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered feature list (numeric first, then categorical) plus the
/// training-time medians used to impute numeric features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    numeric: Vec<Feature>,
    categorical: Vec<Feature>,
    /// Aligned with `numeric`.
    medians: Vec<f64>,
}

impl FeatureSchema {
    /// Build a schema. `medians` must align with `numeric`.
    pub fn new(
        numeric: Vec<Feature>,
        categorical: Vec<Feature>,
        medians: Vec<f64>,
    ) -> Result<Self, SchemaError> {
        if numeric.len() != medians.len() {
            return Err(SchemaError::WidthMismatch {
                expected: numeric.len(),
                actual: medians.len(),
            });
        }
        Ok(Self {
            numeric,
            categorical,
            medians,
        })
    }

    pub fn numeric_features(&self) -> &[Feature] {
        &self.numeric
    }

    pub fn categorical_features(&self) -> &[Feature] {
        &self.categorical
    }

    pub fn medians(&self) -> &[f64] {
        &self.medians
    }

    /// Training-time median of a numeric feature.
    pub fn median(&self, feature: Feature) -> Option<f64> {
        self.numeric
            .iter()
            .position(|f| *f == feature)
            .map(|i| self.medians[i])
    }

    /// All features in model input order.
    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.numeric.iter().chain(self.categorical.iter()).copied()
    }

    pub fn names(&self) -> Vec<String> {
        self.features().map(|f| f.name().to_string()).collect()
    }

    /// Positions of the categorical features in model input order.
    pub fn categorical_indices(&self) -> Vec<usize> {
        (self.numeric.len()..self.len()).collect()
    }

    pub fn len(&self) -> usize {
        self.numeric.len() + self.categorical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject any feature list that differs from this schema's, in content
    /// or order.
    pub fn ensure_features(
        &self,
        numeric: &[Feature],
        categorical: &[Feature],
    ) -> Result<(), SchemaError> {
        if self.numeric == numeric && self.categorical == categorical {
            return Ok(());
        }
        Err(SchemaError::FeatureMismatch {
            expected: self.names(),
            actual: numeric
                .iter()
                .chain(categorical)
                .map(|f| f.name().to_string())
                .collect(),
        })
    }
}
