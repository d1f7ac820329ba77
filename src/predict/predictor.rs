//! Record in, score and label out

use serde::{Deserialize, Serialize};

use crate::data::Record;
use crate::encoding::OneHotEncoder;
use crate::errors::{Result, StressError};
use crate::model::TrainedModel;
use crate::predict::advice::{self, Advice};
use crate::predict::level::{StressLevel, ThresholdPolicy};

/// Outcome of scoring one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub score: f64,
    pub level: StressLevel,
}

impl Prediction {
    pub fn advice(&self) -> &'static Advice {
        advice::for_level(self.level)
    }

    /// Pretty JSON for `predict --json`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Owns the fitted model for the lifetime of the process
#[derive(Debug)]
pub struct Predictor {
    model: TrainedModel,
    policy: ThresholdPolicy,
}

impl Predictor {
    pub fn new(model: TrainedModel, policy: ThresholdPolicy) -> Self {
        Self { model, policy }
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn policy(&self) -> ThresholdPolicy {
        self.policy
    }

    /// Encode against the training schema, score, threshold
    pub fn predict(&self, record: &Record) -> Result<Prediction> {
        let row = OneHotEncoder::encode(record, self.model.schema());
        let score = self.model.predict_encoded(row.view())?;
        if !score.is_finite() {
            return Err(StressError::ModelError(format!("model returned a non-finite score ({})", score)));
        }
        let level = self.policy.classify(score);

        tracing::debug!(score, level = %level, occupation = %record.occupation, "prediction");
        Ok(Prediction { score, level })
    }
}
