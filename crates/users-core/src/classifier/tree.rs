//! CART decision tree (binary labels, Gini impurity)

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::dataset::{Sample, FEATURE_COUNT};

/// Growth limits of a single tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Nodes with fewer samples become leaves
    pub min_samples_split: usize,
    /// Non-constant features evaluated per split
    pub max_features: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: FEATURE_COUNT,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        /// Fraction of training samples in this leaf labeled 1
        positive: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Fitted decision tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Fit on `samples[i]` for every `i` in `indices` (repeats allowed)
    pub fn fit(samples: &[Sample], indices: &[usize], params: &TreeParams, rng: &mut StdRng) -> Self {
        Self {
            root: grow(samples, indices.to_vec(), params, rng, 0),
        }
    }

    /// Probability of label 1 for `features`
    pub fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { positive } => return *positive,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Depth of the deepest leaf (a single leaf has depth 0)
    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }
}

fn gini(positive: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positive as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

fn count_positive(samples: &[Sample], indices: &[usize]) -> usize {
    indices.iter().filter(|&&i| samples[i].label == 1).count()
}

fn grow(
    samples: &[Sample],
    indices: Vec<usize>,
    params: &TreeParams,
    rng: &mut StdRng,
    depth: usize,
) -> Node {
    let total = indices.len();
    if total == 0 {
        return Node::Leaf { positive: 0.0 };
    }

    let positive = count_positive(samples, &indices);
    let leaf = Node::Leaf {
        positive: positive as f64 / total as f64,
    };

    let pure = positive == 0 || positive == total;
    let too_deep = params.max_depth.is_some_and(|max| depth >= max);
    if pure || too_deep || total < params.min_samples_split.max(2) {
        return leaf;
    }

    let Some(split) = best_split(samples, &indices, positive, params, rng) else {
        return leaf;
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| samples[i].features[split.feature] <= split.threshold);
    if left.is_empty() || right.is_empty() {
        return leaf;
    }

    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(grow(samples, left, params, rng, depth + 1)),
        right: Box::new(grow(samples, right, params, rng, depth + 1)),
    }
}

/// Best Gini split over up to `max_features` randomly drawn, non-constant features
fn best_split(
    samples: &[Sample],
    indices: &[usize],
    positive: usize,
    params: &TreeParams,
    rng: &mut StdRng,
) -> Option<SplitCandidate> {
    let total = indices.len();
    let parent = gini(positive, total);

    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    features.shuffle(rng);

    let mut best: Option<SplitCandidate> = None;
    let mut evaluated = 0;

    for feature in features {
        if evaluated >= params.max_features.max(1) {
            break;
        }

        let mut column: Vec<(f64, u8)> = indices
            .iter()
            .map(|&i| (samples[i].features[feature], samples[i].label))
            .collect();
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        if column[total - 1].0 <= column[0].0 {
            // Constant feature, draw another one
            continue;
        }
        evaluated += 1;

        let mut left_positive = 0;
        for k in 1..total {
            left_positive += usize::from(column[k - 1].1);
            let (lower, upper) = (column[k - 1].0, column[k].0);
            if upper <= lower {
                continue;
            }

            let right_positive = positive - left_positive;
            let impurity = (k as f64 * gini(left_positive, k)
                + (total - k) as f64 * gini(right_positive, total - k))
                / total as f64;

            if best.map_or(true, |b| impurity < b.impurity) {
                let mut threshold = lower + (upper - lower) / 2.0;
                if threshold >= upper {
                    threshold = lower;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
    }

    best.filter(|b| b.impurity < parent)
}
