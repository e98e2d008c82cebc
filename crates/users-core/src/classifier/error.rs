//! Classifier errors

use thiserror::Error;

/// Reasons a training set cannot produce a model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("at least 2 samples are required, found {found}")]
    TooFewSamples { found: usize },

    #[error("activity {activity_id} has label {label}, expected 0 or 1")]
    InvalidLabel { activity_id: i64, label: i32 },

    #[error("activity {activity_id} has a non-finite session duration")]
    NonFiniteFeature { activity_id: i64 },

    #[error("all samples share the same label")]
    SingleClass,
}
