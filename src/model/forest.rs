//! Random forest regressor
//!
//! Bagged regression trees with averaged output. A single seed drives the
//! bootstrap draws and every tree's feature sampling, so a fit is
//! reproducible for the same data and parameters.

use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::{Result, StressError};
use crate::model::tree::{RegressionTree, TreeParams};
use crate::model::Regressor;

/// Ensemble parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub tree: TreeParams,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            tree: TreeParams::default(),
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Averaging ensemble of regression trees
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    params: ForestParams,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForestRegressor {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::with_capacity(params.n_estimators),
            n_features: 0,
        }
    }

    /// Fit on the selected rows of `x`
    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, rows: &[usize]) -> Result<()> {
        if self.params.n_estimators == 0 {
            return Err(StressError::ModelError("n_estimators must be at least 1".to_string()));
        }
        if rows.is_empty() {
            return Err(StressError::ModelError("cannot fit a forest on zero rows".to_string()));
        }

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        self.trees.clear();
        self.n_features = x.ncols();

        for _ in 0..self.params.n_estimators {
            let sample: Vec<usize> = if self.params.bootstrap {
                (0..rows.len()).map(|_| rows[rng.gen_range(0..rows.len())]).collect()
            } else {
                rows.to_vec()
            };

            let mut tree_rng = StdRng::seed_from_u64(rng.gen());
            let mut tree = RegressionTree::new(self.params.tree);
            tree.fit(x, y, &sample, &mut tree_rng)?;
            self.trees.push(tree);
        }

        tracing::debug!(
            trees = self.trees.len(),
            rows = rows.len(),
            features = self.n_features,
            "random forest fitted"
        );
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Predict every row of `x`
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        let scores = x.rows().into_iter().map(|row| self.predict_row(row)).collect::<Result<Vec<f64>>>()?;
        Ok(Array1::from(scores))
    }
}

impl Regressor for RandomForestRegressor {
    fn predict_row(&self, row: ArrayView1<'_, f64>) -> Result<f64> {
        if !self.is_fitted() {
            return Err(StressError::ModelError("forest has not been fitted".to_string()));
        }
        if row.len() != self.n_features {
            return Err(StressError::SchemaMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict_row(row)?;
        }
        Ok(total / self.trees.len() as f64)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
