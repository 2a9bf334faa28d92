//! A depth-bounded CART decision tree over dense numeric features.
//!
//! Splits minimise weighted Gini impurity. Candidate thresholds are midpoints
//! between adjacent distinct values, features are tried in index order and
//! the first best split wins, so training is deterministic.

use serde::{Deserialize, Serialize};

/// Number of features per sample.
pub const FEATURE_COUNT: usize = 7;

/// One encoded sample.
pub type Features = [f64; FEATURE_COUNT];

/// Splits must lower impurity by more than this to be kept.
const MIN_GAIN: f64 = 1e-12;

/// A training row: features and the index of its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Encoded features.
    pub features: Features,
    /// Label index.
    pub label: usize,
}

impl Sample {
    fn value(&self, feature: usize) -> f64 {
        self.features.get(feature).copied().unwrap_or(0.0)
    }
}

/// A node of a trained tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Predicts a label.
    Leaf {
        /// Label index.
        class: usize,
    },
    /// Routes samples with `feature <= threshold` left and the rest right.
    Split {
        /// Feature index.
        feature: usize,
        /// Decision threshold.
        threshold: f64,
        /// Subtree for values at or below the threshold.
        left: Box<Node>,
        /// Subtree for values above the threshold.
        right: Box<Node>,
    },
}

impl Node {
    /// Grow a tree over `samples` with labels in `0..class_count`.
    ///
    /// An empty sample set yields a leaf predicting label `0`.
    #[must_use]
    pub fn grow(samples: &[Sample], class_count: usize, max_depth: usize) -> Self {
        let refs: Vec<&Sample> = samples.iter().collect();
        build(&refs, class_count, max_depth)
    }

    /// Label predicted for `features`.
    #[must_use]
    pub fn predict(&self, features: &Features) -> usize {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { class } => return *class,
                Self::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Longest root-to-leaf path, counted in splits.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

fn build(samples: &[&Sample], class_count: usize, depth_left: usize) -> Node {
    let counts = class_counts(samples, class_count);
    let leaf = Node::Leaf {
        class: majority(&counts),
    };
    let distinct_labels = counts.iter().filter(|count| **count > 0).count();
    if depth_left == 0 || distinct_labels <= 1 {
        return leaf;
    }
    let parent = gini(&counts, samples.len());
    let Some(split) = best_split(samples, class_count, parent) else {
        return leaf;
    };
    let (left, right): (Vec<&Sample>, Vec<&Sample>) = samples
        .iter()
        .copied()
        .partition(|sample| sample.value(split.feature) <= split.threshold);
    let next_depth = depth_left.saturating_sub(1);
    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(build(&left, class_count, next_depth)),
        right: Box::new(build(&right, class_count, next_depth)),
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

#[expect(
    clippy::float_arithmetic,
    reason = "thresholds are midpoints and impurity improvements are differences"
)]
fn best_split(samples: &[&Sample], class_count: usize, parent: f64) -> Option<Candidate> {
    let total = samples.len();
    let mut best: Option<Candidate> = None;
    for feature in 0..FEATURE_COUNT {
        let mut ordered = samples.to_vec();
        ordered.sort_by(|lhs, rhs| lhs.value(feature).total_cmp(&rhs.value(feature)));
        let mut left = vec![0_usize; class_count];
        let mut right = class_counts(&ordered, class_count);
        for (index, pair) in ordered.windows(2).enumerate() {
            let &[current, next] = pair else {
                continue;
            };
            shift_label(&mut left, &mut right, current.label);
            let (low, high) = (current.value(feature), next.value(feature));
            if low >= high {
                continue;
            }
            let left_len = index + 1;
            let impurity = weighted_gini(&left, left_len, &right, total - left_len);
            let bound = best.map_or(parent, |candidate| candidate.impurity);
            if impurity + MIN_GAIN < bound {
                best = Some(Candidate {
                    feature,
                    threshold: low + (high - low) / 2.0,
                    impurity,
                });
            }
        }
    }
    best
}

fn shift_label(left: &mut [usize], right: &mut [usize], label: usize) {
    if let Some(count) = left.get_mut(label) {
        *count += 1;
    }
    if let Some(count) = right.get_mut(label) {
        *count = count.saturating_sub(1);
    }
}

fn class_counts(samples: &[&Sample], class_count: usize) -> Vec<usize> {
    let mut counts = vec![0_usize; class_count];
    for sample in samples {
        if let Some(count) = counts.get_mut(sample.label) {
            *count += 1;
        }
    }
    counts
}

/// Most frequent label; the lowest index wins ties.
fn majority(counts: &[usize]) -> usize {
    let mut best = (0, 0);
    for (label, count) in counts.iter().copied().enumerate() {
        if count > best.1 {
            best = (label, count);
        }
    }
    best.0
}

#[expect(
    clippy::float_arithmetic,
    reason = "Gini impurity is one minus the sum of squared proportions"
)]
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let size = count_as_f64(total);
    1.0 - counts
        .iter()
        .map(|count| {
            let share = count_as_f64(*count) / size;
            share * share
        })
        .sum::<f64>()
}

#[expect(
    clippy::float_arithmetic,
    reason = "child impurities are weighted by their share of samples"
)]
fn weighted_gini(left: &[usize], left_len: usize, right: &[usize], right_len: usize) -> f64 {
    let total = count_as_f64(left_len + right_len);
    let weighted = count_as_f64(left_len) * gini(left, left_len)
        + count_as_f64(right_len) * gini(right, right_len);
    weighted / total
}

fn count_as_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}
