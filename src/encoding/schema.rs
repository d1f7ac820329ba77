//! Feature schema captured at training time
//!
//! The schema is the single source of truth for column order. Every row handed
//! to the model, training or query, is laid out against it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::record::{CategoricalField, NUMERIC_COLUMNS};
use crate::errors::Result;

/// Observed levels of one categorical field, sorted. The first is the
/// reference level and has no column of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLevels {
    pub field: CategoricalField,
    pub levels: Vec<String>,
}

impl FieldLevels {
    pub fn reference(&self) -> Option<&str> {
        self.levels.first().map(String::as_str)
    }

    /// Levels that get an indicator column
    pub fn encoded_levels(&self) -> &[String] {
        if self.levels.is_empty() {
            &self.levels
        } else {
            &self.levels[1..]
        }
    }
}

/// Ordered set of encoded column names a fitted model expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<String>,
    fields: Vec<FieldLevels>,
}

/// Name of the indicator column for `level` of `field`
pub fn dummy_column(field: CategoricalField, level: &str) -> String {
    format!("{}_{}", field.column(), level)
}

impl FeatureSchema {
    /// Build from per-field levels. Levels are sorted and deduplicated here.
    pub fn new(mut fields: Vec<FieldLevels>) -> Self {
        let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();

        for field in fields.iter_mut() {
            field.levels.sort();
            field.levels.dedup();
            columns.extend(field.encoded_levels().iter().map(|l| dummy_column(field.field, l)));
        }

        Self { columns, fields }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn fields(&self) -> &[FieldLevels] {
        &self.fields
    }

    /// Levels seen in training for one field
    pub fn levels(&self, field: CategoricalField) -> &[String] {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.levels.as_slice())
            .unwrap_or(&[])
    }

    /// The implicit baseline level per field
    pub fn reference_levels(&self) -> Vec<(CategoricalField, &str)> {
        self.fields
            .iter()
            .filter_map(|f| f.reference().map(|r| (f.field, r)))
            .collect()
    }

    /// Column name to position
    pub fn index(&self) -> HashMap<&str, usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender_levels() -> FieldLevels {
        FieldLevels {
            field: CategoricalField::Gender,
            levels: vec!["Male".to_string(), "Female".to_string(), "Male".to_string()],
        }
    }

    #[test]
    fn test_numeric_columns_first() {
        let schema = FeatureSchema::new(vec![gender_levels()]);
        assert_eq!(&schema.columns()[..8], &NUMERIC_COLUMNS.map(String::from)[..]);
    }

    #[test]
    fn test_first_level_dropped() {
        let schema = FeatureSchema::new(vec![gender_levels()]);
        assert_eq!(schema.len(), 9);
        assert_eq!(schema.columns()[8], "Gender_Male");
        assert_eq!(schema.reference_levels(), vec![(CategoricalField::Gender, "Female")]);
    }

    #[test]
    fn test_single_level_field_adds_no_columns() {
        let schema = FeatureSchema::new(vec![FieldLevels {
            field: CategoricalField::SleepDisorder,
            levels: vec!["None".to_string()],
        }]);
        assert_eq!(schema.len(), NUMERIC_COLUMNS.len());
    }

    #[test]
    fn test_position_lookup() {
        let schema = FeatureSchema::new(vec![gender_levels()]);
        assert_eq!(schema.position("Age"), Some(0));
        assert_eq!(schema.position("Gender_Male"), Some(8));
        assert_eq!(schema.position("Gender_Female"), None);
        assert_eq!(schema.index().len(), schema.len());
    }

    #[test]
    fn test_schema_json_roundtrip() {
        let schema = FeatureSchema::new(vec![gender_levels()]);
        let json = schema.to_json().unwrap();
        let back: FeatureSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);
    }
}
