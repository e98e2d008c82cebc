//! Random forest: bagged CART trees with per-split feature sampling

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dataset::{Dataset, FEATURE_COUNT};
use super::tree::{DecisionTree, TreeParams};
use super::DEFAULT_SEED;

/// Forest hyper-parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestParams {
    /// Number of trees
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Features evaluated per split; `None` means `floor(sqrt(FEATURE_COUNT))`
    pub max_features: Option<usize>,
    /// Train each tree on a bootstrap resample of the training split
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestParams {
    fn tree_params(&self) -> TreeParams {
        let sqrt_features = (FEATURE_COUNT as f64).sqrt().floor() as usize;
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            max_features: self.max_features.unwrap_or(sqrt_features).clamp(1, FEATURE_COUNT),
        }
    }
}

/// Fitted forest
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit on the rows of `dataset` listed in `indices`
    pub fn fit(dataset: &Dataset, indices: &[usize], params: &ForestParams) -> Self {
        let tree_params = params.tree_params();
        let mut seeds = StdRng::seed_from_u64(params.seed);

        let trees = (0..params.n_trees.max(1))
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(seeds.gen());
                let drawn: Vec<usize> = if params.bootstrap && !indices.is_empty() {
                    (0..indices.len())
                        .map(|_| indices[rng.gen_range(0..indices.len())])
                        .collect()
                } else {
                    indices.to_vec()
                };
                DecisionTree::fit(dataset.samples(), &drawn, &tree_params, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Mean of the per-tree probabilities of label 1
    pub fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(features)).sum();
        (sum / self.trees.len() as f64).clamp(0.0, 1.0)
    }

    /// Predicted label; ties go to 0
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> u8 {
        u8::from(self.predict_proba(features) > 0.5)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
