//! Training samples and the train/test split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::entities::UserActivity;

use super::error::ClassifierError;

/// Number of features per sample
pub const FEATURE_COUNT: usize = 3;

/// Behavioural features of one user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityFeatures {
    pub visits: i32,
    pub actions: i32,
    pub session_duration: f64,
}

impl ActivityFeatures {
    /// Features in training order: visits, actions, session duration
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.visits),
            f64::from(self.actions),
            self.session_duration,
        ]
    }
}

/// A labeled feature vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub features: [f64; FEATURE_COUNT],
    /// 0 or 1
    pub label: u8,
}

/// Validated training data
#[derive(Debug, Clone)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Build a dataset from activity rows, rejecting degenerate input
    pub fn from_activities(activities: &[UserActivity]) -> Result<Self, ClassifierError> {
        if activities.len() < 2 {
            return Err(ClassifierError::TooFewSamples {
                found: activities.len(),
            });
        }

        let mut samples = Vec::with_capacity(activities.len());
        for activity in activities {
            let label = match activity.next_month_activity {
                0 => 0,
                1 => 1,
                label => {
                    return Err(ClassifierError::InvalidLabel {
                        activity_id: activity.id,
                        label,
                    })
                }
            };
            if !activity.session_duration.is_finite() {
                return Err(ClassifierError::NonFiniteFeature {
                    activity_id: activity.id,
                });
            }
            samples.push(Sample {
                features: activity.features().to_vector(),
                label,
            });
        }

        let positives = samples.iter().filter(|s| s.label == 1).count();
        if positives == 0 || positives == samples.len() {
            return Err(ClassifierError::SingleClass);
        }

        Ok(Self { samples })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn sample(&self, index: usize) -> &Sample {
        &self.samples[index]
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Shuffle `0..n` with `seed` and cut it into (train, test) index sets
///
/// The test set holds `ceil(n * test_fraction)` indices, at least one and at
/// most `n - 1` whenever `n >= 2`.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = if n < 2 {
        0
    } else {
        ((n as f64 * test_fraction).ceil() as usize).clamp(1, n - 1)
    };

    let train = indices.split_off(test_size);
    (train, indices)
}
