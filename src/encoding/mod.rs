//! Feature encoding: one-hot schema and row alignment

pub mod encoder;
pub mod schema;

pub use encoder::OneHotEncoder;
pub use schema::{dummy_column, FeatureSchema, FieldLevels};
