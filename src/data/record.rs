//! Lifestyle record types
//!
//! A `Record` is one person's answers. Categorical fields stay as strings
//! because occupations and disorders are open sets in the source data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, StressError};

/// Category used when no sleep disorder was reported
pub const NO_DISORDER: &str = "None";

/// Fallback occupation for anything outside the known list
pub const OTHER_OCCUPATION: &str = "Others";

/// Systolic/diastolic pair, usually written as `"120/80"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

impl BloodPressure {
    pub fn new(systolic: u32, diastolic: u32) -> Self {
        Self { systolic, diastolic }
    }

    /// Parse a combined `"systolic/diastolic"` reading
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || StressError::invalid_input("blood pressure", format!("'{}' is not in the form 120/80", input));

        let (sys, dia) = input.trim().split_once('/').ok_or_else(invalid)?;
        let systolic: u32 = sys.trim().parse().map_err(|_| invalid())?;
        let diastolic: u32 = dia.trim().parse().map_err(|_| invalid())?;

        if systolic == 0 || diastolic == 0 {
            return Err(invalid());
        }

        Ok(Self { systolic, diastolic })
    }
}

impl FromStr for BloodPressure {
    type Err = StressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Categorical fields, in encoding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    Gender,
    Occupation,
    BmiCategory,
    SleepDisorder,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::Gender,
        CategoricalField::Occupation,
        CategoricalField::BmiCategory,
        CategoricalField::SleepDisorder,
    ];

    /// Dataset column name, also the prefix of its dummy columns
    pub fn column(&self) -> &'static str {
        match self {
            CategoricalField::Gender => "Gender",
            CategoricalField::Occupation => "Occupation",
            CategoricalField::BmiCategory => "BMI Category",
            CategoricalField::SleepDisorder => "Sleep Disorder",
        }
    }
}

/// Numeric feature columns, in encoding order
pub const NUMERIC_COLUMNS: [&str; 8] = [
    "Age",
    "Sleep Duration",
    "Quality of Sleep",
    "Physical Activity Level",
    "Heart Rate",
    "Daily Steps",
    "Systolic BP",
    "Diastolic BP",
];

/// One individual's lifestyle attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub gender: String,
    pub age: u32,
    pub occupation: String,
    /// Hours per night
    pub sleep_duration: f64,
    /// 1-10
    pub sleep_quality: u32,
    pub physical_activity: u32,
    pub bmi_category: String,
    pub blood_pressure: BloodPressure,
    pub heart_rate: u32,
    pub daily_steps: u32,
    pub sleep_disorder: Option<String>,
}

impl Record {
    /// Value of a categorical field, with absent disorders reported as `"None"`
    pub fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Gender => &self.gender,
            CategoricalField::Occupation => &self.occupation,
            CategoricalField::BmiCategory => &self.bmi_category,
            CategoricalField::SleepDisorder => self.sleep_disorder.as_deref().unwrap_or(NO_DISORDER),
        }
    }

    /// Numeric features in `NUMERIC_COLUMNS` order
    pub fn numeric_features(&self) -> [f64; 8] {
        [
            self.age as f64,
            self.sleep_duration,
            self.sleep_quality as f64,
            self.physical_activity as f64,
            self.heart_rate as f64,
            self.daily_steps as f64,
            self.blood_pressure.systolic as f64,
            self.blood_pressure.diastolic as f64,
        ]
    }

    /// Hashable identity of the attributes, used for duplicate removal
    pub(crate) fn row_key(&self) -> RowKey {
        RowKey {
            categories: CategoricalField::ALL.map(|f| self.category(f).to_string()),
            numeric: self.numeric_features().map(f64::to_bits),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RowKey {
    categories: [String; 4],
    numeric: [u64; 8],
}

#[cfg(test)]
pub(crate) fn sample_record() -> Record {
    Record {
        gender: "Male".to_string(),
        age: 28,
        occupation: "Doctor".to_string(),
        sleep_duration: 6.2,
        sleep_quality: 6,
        physical_activity: 60,
        bmi_category: "Normal".to_string(),
        blood_pressure: BloodPressure::new(125, 80),
        heart_rate: 75,
        daily_steps: 10000,
        sleep_disorder: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_pressure_split() {
        let bp = BloodPressure::parse("120/80").unwrap();
        assert_eq!(bp.systolic, 120);
        assert_eq!(bp.diastolic, 80);
    }

    #[test]
    fn test_blood_pressure_whitespace() {
        let bp: BloodPressure = " 132 / 87 ".parse().unwrap();
        assert_eq!(bp, BloodPressure::new(132, 87));
        assert_eq!(bp.to_string(), "132/87");
    }

    #[test]
    fn test_blood_pressure_rejects_garbage() {
        assert!(BloodPressure::parse("120").is_err());
        assert!(BloodPressure::parse("120/").is_err());
        assert!(BloodPressure::parse("high").is_err());
        assert!(BloodPressure::parse("0/80").is_err());
        assert!(BloodPressure::parse("120/80/60").is_err());
    }

    #[test]
    fn test_missing_disorder_is_none_category() {
        let record = sample_record();
        assert_eq!(record.category(CategoricalField::SleepDisorder), NO_DISORDER);
    }

    #[test]
    fn test_numeric_features_order() {
        let features = sample_record().numeric_features();
        assert_eq!(features[0], 28.0);
        assert_eq!(features[6], 125.0);
        assert_eq!(features[7], 80.0);
        assert_eq!(features.len(), NUMERIC_COLUMNS.len());
    }

    #[test]
    fn test_row_key_distinguishes_rows() {
        let a = sample_record();
        let mut b = sample_record();
        assert_eq!(a.row_key(), b.row_key());
        b.daily_steps += 1;
        assert_ne!(a.row_key(), b.row_key());
    }
}
