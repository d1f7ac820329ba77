//! CART regression tree
//!
//! Splits greedily on the feature/threshold pair with the largest reduction in
//! squared error. Thresholds sit halfway between adjacent distinct values.

use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::index::sample;

use crate::errors::{Result, StressError};
use crate::model::Regressor;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    /// `None` grows until leaves are pure or too small to split
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features considered per split; `None` considers all
    pub max_features: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
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

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature: usize,
    threshold: f64,
    sse: f64,
}

/// Regression tree over a dense feature matrix
#[derive(Debug, Clone)]
pub struct RegressionTree {
    params: TreeParams,
    root: Option<Node>,
    n_features: usize,
}

impl RegressionTree {
    pub fn new(params: TreeParams) -> Self {
        Self {
            params,
            root: None,
            n_features: 0,
        }
    }

    /// Fit on the rows of `x` selected by `indices` (repeats allowed)
    pub fn fit(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        indices: &[usize],
        rng: &mut StdRng,
    ) -> Result<()> {
        if indices.is_empty() {
            return Err(StressError::ModelError("cannot fit a tree on zero rows".to_string()));
        }
        if x.nrows() != y.len() {
            return Err(StressError::ModelError(format!(
                "{} feature rows but {} targets",
                x.nrows(),
                y.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= x.nrows()) {
            return Err(StressError::ModelError(format!(
                "row {} out of range for {} rows",
                bad,
                x.nrows()
            )));
        }

        self.n_features = x.ncols();
        let mut rows = indices.to_vec();
        self.root = Some(self.grow(x, y, &mut rows, 0, rng));
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Number of nodes, leaves included
    pub fn n_nodes(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => 1 + count(left) + count(right),
            }
        }
        self.root.as_ref().map(count).unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        self.root.as_ref().map(depth).unwrap_or(0)
    }

    fn grow(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        rows: &mut [usize],
        depth: usize,
        rng: &mut StdRng,
    ) -> Node {
        let value = mean(rows.iter().map(|&i| y[i]));

        let depth_reached = self.params.max_depth.map_or(false, |max| depth >= max);
        if depth_reached || rows.len() < self.params.min_samples_split.max(2) {
            return Node::Leaf { value };
        }

        let parent_sse = sse(rows.iter().map(|&i| y[i]));
        if parent_sse <= f64::EPSILON {
            return Node::Leaf { value };
        }

        let best = match self.best_split(x, y, rows, rng) {
            Some(best) if best.sse < parent_sse - 1e-12 => best,
            _ => return Node::Leaf { value },
        };

        // Partition in place: left side holds rows at or below the threshold
        let mut boundary = 0;
        for i in 0..rows.len() {
            if x[[rows[i], best.feature]] <= best.threshold {
                rows.swap(i, boundary);
                boundary += 1;
            }
        }

        let (left_rows, right_rows) = rows.split_at_mut(boundary);
        let left = self.grow(x, y, left_rows, depth + 1, rng);
        let right = self.grow(x, y, right_rows, depth + 1, rng);

        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn candidate_features(&self, rng: &mut StdRng) -> Vec<usize> {
        match self.params.max_features {
            Some(k) if k > 0 && k < self.n_features => sample(rng, self.n_features, k).into_vec(),
            _ => (0..self.n_features).collect(),
        }
    }

    fn best_split(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        rows: &[usize],
        rng: &mut StdRng,
    ) -> Option<BestSplit> {
        let min_leaf = self.params.min_samples_leaf.max(1);
        let n = rows.len();
        let mut best: Option<BestSplit> = None;
        let mut sorted = rows.to_vec();

        for feature in self.candidate_features(rng) {
            let column = x.column(feature);
            sorted.sort_by(|&a, &b| column[a].total_cmp(&column[b]));

            let total_sum: f64 = sorted.iter().map(|&i| y[i]).sum();
            let total_sq: f64 = sorted.iter().map(|&i| y[i] * y[i]).sum();
            let mut left_sum = 0.0;
            let mut left_sq = 0.0;

            for split in 1..n {
                let prev = sorted[split - 1];
                left_sum += y[prev];
                left_sq += y[prev] * y[prev];

                let lo = column[prev];
                let hi = column[sorted[split]];
                if hi <= lo || split < min_leaf || n - split < min_leaf {
                    continue;
                }

                let left_n = split as f64;
                let right_n = (n - split) as f64;
                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let candidate = (left_sq - left_sum * left_sum / left_n) + (right_sq - right_sum * right_sum / right_n);

                if best.map_or(true, |b| candidate < b.sse) {
                    best = Some(BestSplit {
                        feature,
                        threshold: lo + (hi - lo) / 2.0,
                        sse: candidate,
                    });
                }
            }
        }

        best
    }
}

impl Regressor for RegressionTree {
    fn predict_row(&self, row: ArrayView1<'_, f64>) -> Result<f64> {
        let mut node = self
            .root
            .as_ref()
            .ok_or_else(|| StressError::ModelError("tree has not been fitted".to_string()))?;

        if row.len() != self.n_features {
            return Err(StressError::SchemaMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        loop {
            match node {
                Node::Leaf { value } => return Ok(*value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn sse(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let m = mean(values.clone());
    values.map(|v| (v - m) * (v - m)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};
    use rand::SeedableRng;

    fn step_data() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((10, 2), |(i, j)| if j == 0 { i as f64 } else { 0.0 });
        let y = Array1::from_shape_fn(10, |i| if i < 5 { 2.0 } else { 8.0 });
        (x, y)
    }

    fn fitted(params: TreeParams, seed: u64) -> RegressionTree {
        let (x, y) = step_data();
        let mut tree = RegressionTree::new(params);
        let mut rng = StdRng::seed_from_u64(seed);
        tree.fit(x.view(), y.view(), &(0..10).collect::<Vec<_>>(), &mut rng).unwrap();
        tree
    }

    #[test]
    fn test_learns_step_function() {
        let tree = fitted(TreeParams::default(), 42);

        assert_eq!(tree.predict_row(array![1.0, 0.0].view()).unwrap(), 2.0);
        assert_eq!(tree.predict_row(array![7.0, 0.0].view()).unwrap(), 8.0);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.n_nodes(), 3);
    }

    #[test]
    fn test_threshold_is_midpoint() {
        let tree = fitted(TreeParams::default(), 42);

        assert_eq!(tree.predict_row(array![4.4, 0.0].view()).unwrap(), 2.0);
        assert_eq!(tree.predict_row(array![4.6, 0.0].view()).unwrap(), 8.0);
    }

    #[test]
    fn test_max_depth_zero_is_mean() {
        let params = TreeParams {
            max_depth: Some(0),
            ..TreeParams::default()
        };
        let tree = fitted(params, 1);
        assert_eq!(tree.predict_row(array![0.0, 0.0].view()).unwrap(), 5.0);
    }

    #[test]
    fn test_constant_target_single_leaf() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![4.0, 4.0, 4.0];
        let mut tree = RegressionTree::new(TreeParams::default());
        let mut rng = StdRng::seed_from_u64(7);
        tree.fit(x.view(), y.view(), &[0, 1, 2], &mut rng).unwrap();
        assert_eq!(tree.n_nodes(), 1);
    }

    #[test]
    fn test_unfitted_tree_errors() {
        let tree = RegressionTree::new(TreeParams::default());
        assert!(tree.predict_row(array![1.0].view()).is_err());
    }

    #[test]
    fn test_width_mismatch() {
        let (x, y) = step_data();
        let mut tree = RegressionTree::new(TreeParams::default());
        let mut rng = StdRng::seed_from_u64(42);
        tree.fit(x.view(), y.view(), &[0, 9], &mut rng).unwrap();
        assert!(matches!(
            tree.predict_row(array![1.0].view()),
            Err(StressError::SchemaMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_empty_fit_rejected() {
        let (x, y) = step_data();
        let mut tree = RegressionTree::new(TreeParams::default());
        let mut rng = StdRng::seed_from_u64(42);
        assert!(tree.fit(x.view(), y.view(), &[], &mut rng).is_err());
    }

    #[test]
    fn test_out_of_range_row_rejected() {
        let (x, y) = step_data();
        let mut tree = RegressionTree::new(TreeParams::default());
        let mut rng = StdRng::seed_from_u64(42);
        assert!(tree.fit(x.view(), y.view(), &[0, 10], &mut rng).is_err());
    }
}
