//! StressBuddy - Mental Stress Manager
//!
//! Estimates a coarse stress level (Low/Medium/High) from sleep and lifestyle
//! attributes using a random forest fitted on the Sleep Health and Lifestyle
//! dataset.
//!
//! # Architecture
//!
//! - **data**: CSV loading, cleaning, the `Record` type
//! - **encoding**: one-hot feature schema and row alignment
//! - **model**: regression trees, random forest, training pipeline
//! - **predict**: thresholds, advice, the `Predictor`
//! - **questionnaire** + **repl**: the interactive check-in
//! - **cli**: arguments and TOML configuration

pub mod errors;

pub use errors::{Result, StressError};

pub mod data;
pub mod encoding;
pub mod model;
pub mod predict;

pub mod questionnaire;
pub mod repl;

pub mod cli;

pub use data::{BloodPressure, Dataset, Record};
pub use encoding::{FeatureSchema, OneHotEncoder};
pub use model::{TrainedModel, Trainer, TrainingOptions};
pub use predict::{Prediction, Predictor, StressLevel, ThresholdPolicy};
