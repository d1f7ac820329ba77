//! Scoring, thresholds and advice

pub mod advice;
pub mod level;
pub mod predictor;

pub use advice::Advice;
pub use level::{StressLevel, ThresholdPolicy};
pub use predictor::{Prediction, Predictor};
