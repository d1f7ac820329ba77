//! Regression model: trees, forest, split and training
//!
//! Everything here works on dense `ndarray` matrices already aligned to a
//! `FeatureSchema`; nothing below this module knows about column names.

pub mod forest;
pub mod metrics;
pub mod split;
pub mod trainer;
pub mod tree;

pub use forest::{ForestParams, RandomForestRegressor};
pub use metrics::Metrics;
pub use split::{train_test_split, Split};
pub use trainer::{TrainedModel, Trainer, TrainingOptions};
pub use tree::{RegressionTree, TreeParams};

use ndarray::ArrayView1;

use crate::errors::Result;

/// A fitted model that scores one aligned row
pub trait Regressor: Send + Sync {
    fn predict_row(&self, row: ArrayView1<'_, f64>) -> Result<f64>;

    /// Row width the model was fitted on
    fn n_features(&self) -> usize;
}
