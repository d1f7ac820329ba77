//! Training pipeline: encode, split, fit, score
//!
//! The schema is derived from the whole cleaned dataset before splitting so
//! test rows and later queries share one column layout.

use std::time::Instant;

use ndarray::{ArrayView1, Axis};

use crate::data::Dataset;
use crate::encoding::{FeatureSchema, OneHotEncoder};
use crate::errors::{Result, StressError};
use crate::model::forest::{ForestParams, RandomForestRegressor};
use crate::model::metrics::Metrics;
use crate::model::split::train_test_split;
use crate::model::Regressor;

/// Knobs for one training run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingOptions {
    pub forest: ForestParams,
    /// Share of rows held out for scoring
    pub test_fraction: f64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            forest: ForestParams::default(),
            test_fraction: 0.2,
        }
    }
}

/// A fitted model with the schema it was trained against.
/// Immutable once built.
pub struct TrainedModel {
    model: Box<dyn Regressor>,
    schema: FeatureSchema,
    metrics: Option<Metrics>,
    train_rows: usize,
    test_rows: usize,
    duration_ms: u64,
}

impl std::fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedModel")
            .field("columns", &self.schema.len())
            .field("metrics", &self.metrics)
            .field("train_rows", &self.train_rows)
            .field("test_rows", &self.test_rows)
            .finish()
    }
}

impl TrainedModel {
    /// Wrap an already fitted regressor. Widths must agree.
    pub fn from_parts(model: Box<dyn Regressor>, schema: FeatureSchema) -> Result<Self> {
        if model.n_features() != schema.len() {
            return Err(StressError::SchemaMismatch {
                expected: schema.len(),
                actual: model.n_features(),
            });
        }
        Ok(Self {
            model,
            schema,
            metrics: None,
            train_rows: 0,
            test_rows: 0,
            duration_ms: 0,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn train_rows(&self) -> usize {
        self.train_rows
    }

    pub fn test_rows(&self) -> usize {
        self.test_rows
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Score an already aligned row
    pub fn predict_encoded(&self, row: ArrayView1<'_, f64>) -> Result<f64> {
        if row.len() != self.schema.len() {
            return Err(StressError::SchemaMismatch {
                expected: self.schema.len(),
                actual: row.len(),
            });
        }
        self.model.predict_row(row)
    }
}

/// Fits a forest on a cleaned dataset
pub struct Trainer {
    options: TrainingOptions,
}

impl Trainer {
    pub fn new(options: TrainingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TrainingOptions {
        &self.options
    }

    pub fn train(&self, dataset: &Dataset) -> Result<TrainedModel> {
        if dataset.is_empty() {
            return Err(StressError::EmptyDataset);
        }

        let start = Instant::now();
        let records = dataset.records();
        let targets = dataset.targets();

        let schema = OneHotEncoder::fit(&records);
        let matrix = OneHotEncoder::encode_all(&records, &schema);

        let split = train_test_split(matrix.nrows(), self.options.test_fraction, self.options.forest.seed);

        let mut forest = RandomForestRegressor::new(self.options.forest);
        forest.fit(matrix.view(), targets.view(), &split.train)?;

        let x_test = matrix.select(Axis(0), &split.test);
        let y_test = targets.select(Axis(0), &split.test);
        let predicted = forest.predict(x_test.view())?;
        let metrics = Metrics::compute(predicted.view(), y_test.view());

        let duration_ms = start.elapsed().as_millis() as u64;
        match &metrics {
            Some(m) => tracing::info!(
                train_rows = split.train.len(),
                test_rows = split.test.len(),
                r2 = m.r2,
                mae = m.mae,
                duration_ms,
                "model trained"
            ),
            None => tracing::warn!(train_rows = split.train.len(), "model trained without a test split"),
        }

        Ok(TrainedModel {
            model: Box::new(forest),
            schema,
            metrics,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
            duration_ms,
        })
    }
}
