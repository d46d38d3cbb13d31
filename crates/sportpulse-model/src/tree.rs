//! Depth-limited regression trees for the boosting loop.
//!
//! Splits minimize the sum of squared errors of the two children, found by
//! an exact scan over sorted feature values with prefix sums. Features are
//! evaluated in canonical order and only a strictly better split replaces
//! the current best, so tree growth is fully deterministic.

use serde::{Deserialize, Serialize};
use sportpulse_core::FEATURE_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub min_leaf_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Fit a tree to `targets` over the rows selected by `indices`.
    pub fn fit(
        rows: &[[f64; FEATURE_COUNT]],
        targets: &[f64],
        indices: &[usize],
        params: TreeParams,
    ) -> Self {
        let root = grow(rows, targets, indices, params.max_depth, params);
        Self { root }
    }

    pub fn predict(&self, values: &[f64; FEATURE_COUNT]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if values[*feature] < *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn mean_target(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

struct Split {
    feature: usize,
    threshold: f64,
    children_sse: f64,
}

fn grow(
    rows: &[[f64; FEATURE_COUNT]],
    targets: &[f64],
    indices: &[usize],
    depth_left: usize,
    params: TreeParams,
) -> Node {
    let value = mean_target(targets, indices);
    if depth_left == 0 || indices.len() < 2 * params.min_leaf_samples.max(1) {
        return Node::Leaf { value };
    }

    let node_sse = sse(targets, indices);
    let best = best_split(rows, targets, indices, params.min_leaf_samples.max(1));

    let split = match best {
        // No split, or no strict SSE reduction: stop growing
        Some(s) if node_sse - s.children_sse > 1e-12 => s,
        _ => return Node::Leaf { value },
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| rows[i][split.feature] < split.threshold);

    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(grow(rows, targets, &left_idx, depth_left - 1, params)),
        right: Box::new(grow(rows, targets, &right_idx, depth_left - 1, params)),
    }
}

fn sse(targets: &[f64], indices: &[usize]) -> f64 {
    let n = indices.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let sum_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();
    sum_sq - sum * sum / n
}

/// Exhaustive best split over all features. Candidate thresholds are the
/// midpoints between distinct consecutive sorted values.
fn best_split(
    rows: &[[f64; FEATURE_COUNT]],
    targets: &[f64],
    indices: &[usize],
    min_leaf: usize,
) -> Option<Split> {
    let n = indices.len();
    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();

    let mut best: Option<Split> = None;
    let mut order = indices.to_vec();

    for feature in 0..FEATURE_COUNT {
        order.sort_by(|&a, &b| {
            rows[a][feature]
                .partial_cmp(&rows[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 0..n - 1 {
            let t = targets[order[k]];
            left_sum += t;
            left_sq += t * t;

            let here = rows[order[k]][feature];
            let next = rows[order[k + 1]][feature];
            if here == next {
                continue;
            }

            let n_left = k + 1;
            let n_right = n - n_left;
            if n_left < min_leaf || n_right < min_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let children_sse = (left_sq - left_sum * left_sum / n_left as f64)
                + (right_sq - right_sum * right_sum / n_right as f64);

            let improves = match &best {
                Some(b) => children_sse < b.children_sse,
                None => true,
            };
            if improves {
                best = Some(Split {
                    feature,
                    threshold: (here + next) / 2.0,
                    children_sse,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests;
