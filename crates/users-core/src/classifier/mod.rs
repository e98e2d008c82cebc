//! Activity classifier
//!
//! A small random forest predicting whether a user will be active next month
//! from `(visits, actions, session_duration)`.
//!
//! ## Overview
//!
//! - [`ActivityClassifier::train`] splits the samples 80/20 with a fixed seed,
//!   fits the forest on the training split and reports held-out accuracy.
//! - [`ActivityModel::predict_probability`] returns P(active) in `[0, 1]`.
//!
//! Training is deterministic: the same rows and parameters always produce the
//! same model.

mod dataset;
mod error;
mod forest;
mod tree;

pub use dataset::{train_test_split, ActivityFeatures, Dataset, Sample, FEATURE_COUNT};
pub use error::ClassifierError;
pub use forest::{ForestParams, RandomForest};
pub use tree::{DecisionTree, TreeParams};

use tracing::info;

use crate::entities::UserActivity;

/// Fraction of the samples held out to measure accuracy
pub const TEST_FRACTION: f64 = 0.2;

/// Seed of the train/test shuffle and of the forest
pub const DEFAULT_SEED: u64 = 42;

/// Outcome of one training run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub train_size: usize,
    pub test_size: usize,
    /// Held-out accuracy in `[0, 1]`
    pub accuracy: f64,
}

/// Fitted activity model
#[derive(Debug, Clone)]
pub struct ActivityModel {
    forest: RandomForest,
}

impl ActivityModel {
    /// Probability that the user is active next month
    pub fn predict_probability(&self, features: &ActivityFeatures) -> f64 {
        self.forest.predict_proba(&features.to_vector())
    }

    /// Number of trees in the underlying forest
    pub fn tree_count(&self) -> usize {
        self.forest.len()
    }
}

/// Trains [`ActivityModel`]s
#[derive(Debug, Clone)]
pub struct ActivityClassifier {
    params: ForestParams,
    split_seed: u64,
}

impl Default for ActivityClassifier {
    fn default() -> Self {
        Self::new(ForestParams::default())
    }
}

impl ActivityClassifier {
    pub fn new(params: ForestParams) -> Self {
        Self {
            split_seed: params.seed,
            params,
        }
    }

    /// Forest parameters used for training
    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Fit a model on `activities`
    ///
    /// # Errors
    /// Returns a [`ClassifierError`] when there are fewer than two samples,
    /// a label outside `{0, 1}`, a non-finite feature, or a single class.
    pub fn train(
        &self,
        activities: &[UserActivity],
    ) -> Result<(ActivityModel, TrainingReport), ClassifierError> {
        let dataset = Dataset::from_activities(activities)?;
        let (train, test) = train_test_split(dataset.len(), TEST_FRACTION, self.split_seed);

        let forest = RandomForest::fit(&dataset, &train, &self.params);

        let correct = test
            .iter()
            .filter(|&&i| {
                let sample = dataset.sample(i);
                forest.predict(&sample.features) == sample.label
            })
            .count();
        let accuracy = if test.is_empty() {
            0.0
        } else {
            correct as f64 / test.len() as f64
        };

        let report = TrainingReport {
            train_size: train.len(),
            test_size: test.len(),
            accuracy,
        };
        info!(
            train_size = report.train_size,
            test_size = report.test_size,
            accuracy = report.accuracy,
            "Activity model trained"
        );

        Ok((ActivityModel { forest }, report))
    }
}
