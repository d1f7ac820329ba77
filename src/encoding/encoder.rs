//! One-hot encoding with reference-level dropping
//!
//! Training rows and query rows go through the same path: encode the row on
//! its own into named indicator columns, then reindex against the schema.
//! Columns the schema lacks are dropped, columns the row lacks become 0.

use std::collections::BTreeSet;

use ndarray::{Array1, Array2};

use crate::data::record::{CategoricalField, Record, NUMERIC_COLUMNS};
use crate::encoding::schema::{dummy_column, FeatureSchema, FieldLevels};

/// One encoded cell before alignment
pub type NamedValue = (String, f64);

/// Stateless encoder; all state lives in the `FeatureSchema` it produces
pub struct OneHotEncoder;

impl OneHotEncoder {
    /// Collect every level per categorical field and derive the schema
    pub fn fit(records: &[Record]) -> FeatureSchema {
        let fields = CategoricalField::ALL
            .iter()
            .map(|&field| {
                let levels: BTreeSet<&str> = records.iter().map(|r| r.category(field)).collect();
                FieldLevels {
                    field,
                    levels: levels.into_iter().map(String::from).collect(),
                }
            })
            .collect();

        let schema = FeatureSchema::new(fields);
        tracing::debug!(columns = schema.len(), "fitted feature schema");
        schema
    }

    /// Encode a lone row. Every present category gets a 1; nothing is dropped
    /// because a single row has only one level per field.
    pub fn encode_row(record: &Record) -> Vec<NamedValue> {
        let numeric = NUMERIC_COLUMNS
            .iter()
            .zip(record.numeric_features())
            .map(|(name, value)| (name.to_string(), value));

        let dummies = CategoricalField::ALL
            .iter()
            .map(|&field| (dummy_column(field, record.category(field)), 1.0));

        numeric.chain(dummies).collect()
    }

    /// Align named values to the schema
    pub fn reindex(values: &[NamedValue], schema: &FeatureSchema) -> Array1<f64> {
        let index = schema.index();
        let mut row = Array1::zeros(schema.len());

        for (name, value) in values {
            match index.get(name.as_str()) {
                Some(&pos) => row[pos] = *value,
                None => tracing::trace!(column = %name, "column not in schema, dropped"),
            }
        }

        row
    }

    /// Encode one record against a fitted schema
    pub fn encode(record: &Record, schema: &FeatureSchema) -> Array1<f64> {
        Self::reindex(&Self::encode_row(record), schema)
    }

    /// Encoded row labelled with its column names, in schema order
    pub fn encode_named(record: &Record, schema: &FeatureSchema) -> Vec<NamedValue> {
        let row = Self::encode(record, schema);
        schema.columns().iter().cloned().zip(row.iter().copied()).collect()
    }

    /// Dense training matrix, one row per record
    pub fn encode_all(records: &[Record], schema: &FeatureSchema) -> Array2<f64> {
        let mut matrix = Array2::zeros((records.len(), schema.len()));
        for (mut row, record) in matrix.rows_mut().into_iter().zip(records) {
            row.assign(&Self::encode(record, schema));
        }
        matrix
    }
}
