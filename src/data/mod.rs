//! Training data and user records

pub mod dataset;
pub mod record;

pub use dataset::{Dataset, LabeledRecord, TARGET_COLUMN};
pub use record::{BloodPressure, CategoricalField, Record, NUMERIC_COLUMNS};
