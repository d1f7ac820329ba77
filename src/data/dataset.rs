//! Dataset loading and cleaning
//!
//! Reads the Sleep Health and Lifestyle CSV, drops the identifier column and
//! duplicate rows, splits combined blood pressure readings and fills missing
//! sleep disorders with the `"None"` category.

use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::Array1;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::data::record::{BloodPressure, Record, RowKey, NO_DISORDER};
use crate::errors::{Result, StressError};

/// Embedded copy of the training data, used when no file is supplied
pub const EMBEDDED_CSV: &str = include_str!("sleep_health_sample.csv");

/// Name of the regression target column
pub const TARGET_COLUMN: &str = "Stress Level";

const ID_COLUMN: &str = "Person ID";
const COMBINED_BP_COLUMN: &str = "Blood Pressure";
const SYSTOLIC_COLUMN: &str = "Systolic BP";
const DIASTOLIC_COLUMN: &str = "Diastolic BP";

/// A cleaned record together with its stress label
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    pub record: Record,
    pub stress_level: f64,
}

impl LabeledRecord {
    /// Duplicate identity: every attribute plus the label
    fn row_key(&self) -> (RowKey, u64) {
        (self.record.row_key(), self.stress_level.to_bits())
    }
}

/// Cleaned training data
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<LabeledRecord>,
    duplicates_dropped: usize,
}

/// Resolved column positions for one CSV header
struct ColumnMap {
    gender: usize,
    age: usize,
    occupation: usize,
    sleep_duration: usize,
    sleep_quality: usize,
    physical_activity: usize,
    stress_level: usize,
    bmi_category: usize,
    blood_pressure: BpColumns,
    heart_rate: usize,
    daily_steps: usize,
    sleep_disorder: Option<usize>,
}

enum BpColumns {
    Combined(usize),
    Split { systolic: usize, diastolic: usize },
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| find(name).ok_or_else(|| StressError::MissingColumn(name.to_string()));

        if find(ID_COLUMN).is_some() {
            tracing::debug!("ignoring identifier column '{}'", ID_COLUMN);
        }

        let blood_pressure = match (find(COMBINED_BP_COLUMN), find(SYSTOLIC_COLUMN), find(DIASTOLIC_COLUMN)) {
            (_, Some(systolic), Some(diastolic)) => BpColumns::Split { systolic, diastolic },
            (Some(combined), _, _) => BpColumns::Combined(combined),
            _ => return Err(StressError::MissingColumn(COMBINED_BP_COLUMN.to_string())),
        };

        Ok(Self {
            gender: require("Gender")?,
            age: require("Age")?,
            occupation: require("Occupation")?,
            sleep_duration: require("Sleep Duration")?,
            sleep_quality: require("Quality of Sleep")?,
            physical_activity: require("Physical Activity Level")?,
            stress_level: require(TARGET_COLUMN)?,
            bmi_category: require("BMI Category")?,
            blood_pressure,
            heart_rate: require("Heart Rate")?,
            daily_steps: require("Daily Steps")?,
            sleep_disorder: find("Sleep Disorder"),
        })
    }
}

impl Dataset {
    /// Load the CSV compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_reader(EMBEDDED_CSV.as_bytes())
    }

    /// Load a CSV file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading dataset");
        let file = File::open(path).map_err(|source| StressError::DatasetUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse and clean CSV data from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(false)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(csv.headers()?)?;

        let mut rows = Vec::new();
        let mut seen = HashSet::new();
        let mut duplicates_dropped = 0;

        for (index, result) in csv.records().enumerate() {
            // Header is line 1
            let row = index + 2;
            let raw = result?;
            let labeled = parse_row(&raw, &columns, row)?;

            if seen.insert(labeled.row_key()) {
                rows.push(labeled);
            } else {
                duplicates_dropped += 1;
            }
        }

        if rows.is_empty() {
            return Err(StressError::EmptyDataset);
        }

        tracing::info!(rows = rows.len(), duplicates_dropped, "dataset cleaned");

        Ok(Self { rows, duplicates_dropped })
    }

    pub fn rows(&self) -> &[LabeledRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of duplicate rows removed while loading
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    /// Attribute records without labels
    pub fn records(&self) -> Vec<Record> {
        self.rows.iter().map(|r| r.record.clone()).collect()
    }

    pub fn targets(&self) -> Array1<f64> {
        self.rows.iter().map(|r| r.stress_level).collect()
    }
}

fn parse_row(raw: &StringRecord, columns: &ColumnMap, row: usize) -> Result<LabeledRecord> {
    let text = |idx: usize| raw.get(idx).unwrap_or("").to_string();

    let blood_pressure = match columns.blood_pressure {
        BpColumns::Combined(idx) => {
            let value = text(idx);
            BloodPressure::parse(&value).map_err(|_| StressError::InvalidCell {
                column: COMBINED_BP_COLUMN.to_string(),
                value,
                row,
            })?
        }
        BpColumns::Split { systolic, diastolic } => BloodPressure::new(
            parse_count(raw, systolic, SYSTOLIC_COLUMN, row)?,
            parse_count(raw, diastolic, DIASTOLIC_COLUMN, row)?,
        ),
    };

    let record = Record {
        gender: text(columns.gender),
        age: parse_count(raw, columns.age, "Age", row)?,
        occupation: text(columns.occupation),
        sleep_duration: parse_real(raw, columns.sleep_duration, "Sleep Duration", row)?,
        sleep_quality: parse_count(raw, columns.sleep_quality, "Quality of Sleep", row)?,
        physical_activity: parse_count(raw, columns.physical_activity, "Physical Activity Level", row)?,
        bmi_category: normalize_bmi(&text(columns.bmi_category)),
        blood_pressure,
        heart_rate: parse_count(raw, columns.heart_rate, "Heart Rate", row)?,
        daily_steps: parse_count(raw, columns.daily_steps, "Daily Steps", row)?,
        sleep_disorder: columns.sleep_disorder.and_then(|idx| normalize_disorder(&text(idx))),
    };

    let stress_level = parse_real(raw, columns.stress_level, TARGET_COLUMN, row)?;

    Ok(LabeledRecord { record, stress_level })
}

fn parse_cell<T: FromStr>(raw: &StringRecord, idx: usize, column: &str, row: usize) -> Result<T> {
    let value = raw.get(idx).unwrap_or("");
    value.parse().map_err(|_| StressError::InvalidCell {
        column: column.to_string(),
        value: value.to_string(),
        row,
    })
}

/// `f64::from_str` accepts `NaN` and `inf`; neither is a usable measurement
fn parse_real(raw: &StringRecord, idx: usize, column: &str, row: usize) -> Result<f64> {
    let value: f64 = parse_cell(raw, idx, column, row)?;
    if !value.is_finite() {
        return Err(StressError::InvalidCell {
            column: column.to_string(),
            value: raw.get(idx).unwrap_or("").to_string(),
            row,
        });
    }
    Ok(value)
}

/// Integer columns are sometimes exported as `"42.0"`
fn parse_count(raw: &StringRecord, idx: usize, column: &str, row: usize) -> Result<u32> {
    let value = parse_real(raw, idx, column, row)?;
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(StressError::InvalidCell {
            column: column.to_string(),
            value: raw.get(idx).unwrap_or("").to_string(),
            row,
        });
    }
    Ok(value as u32)
}

/// The public dataset spells the healthy category two ways
pub fn normalize_bmi(value: &str) -> String {
    if value.eq_ignore_ascii_case("normal weight") {
        "Normal".to_string()
    } else {
        value.to_string()
    }
}

/// Empty cells and `NaN` mean no disorder
pub fn normalize_disorder(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed == NO_DISORDER {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Person ID,Gender,Age,Occupation,Sleep Duration,Quality of Sleep,Physical Activity Level,Stress Level,BMI Category,Blood Pressure,Heart Rate,Daily Steps,Sleep Disorder";

    #[test]
    fn test_embedded_dataset_loads() {
        let dataset = Dataset::embedded().unwrap();
        assert!(dataset.len() > 20);
        assert!(dataset.duplicates_dropped() > 0);
    }

    #[test]
    fn test_duplicates_ignore_identifier() {
        let csv = format!(
            "{}\n1,Male,28,Doctor,6.2,6,60,8,Normal,125/80,75,10000,None\n2,Male,28,Doctor,6.2,6,60,8,Normal,125/80,75,10000,None\n",
            HEADER
        );
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.duplicates_dropped(), 1);
    }

    #[test]
    fn test_rows_differing_only_in_label_are_kept() {
        let csv = format!(
            "{}\n1,Male,28,Doctor,6.2,6,60,8,Normal,125/80,75,10000,None\n2,Male,28,Doctor,6.2,6,60,3,Normal,125/80,75,10000,None\n",
            HEADER
        );
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.duplicates_dropped(), 0);
        assert_eq!(dataset.targets().to_vec(), vec![8.0, 3.0]);
    }

    #[test]
    fn test_non_finite_cells_rejected() {
        let cases = [
            ("NaN", "6.2", TARGET_COLUMN),
            ("inf", "6.2", TARGET_COLUMN),
            ("7", "NaN", "Sleep Duration"),
            ("7", "-inf", "Sleep Duration"),
        ];
        for (stress, sleep, expected) in cases {
            let csv = format!(
                "{}\n1,Male,28,Doctor,{},6,60,{},Normal,125/80,75,10000,None\n",
                HEADER, sleep, stress
            );
            match Dataset::from_reader(csv.as_bytes()) {
                Err(StressError::InvalidCell { column, row, .. }) => {
                    assert_eq!(column, expected);
                    assert_eq!(row, 2);
                }
                other => panic!("expected invalid cell for {}/{}, got {:?}", stress, sleep, other),
            }
        }
    }

    #[test]
    fn test_non_finite_count_rejected() {
        let csv = format!("{}\n1,Male,NaN,Doctor,7.6,7,75,6,Normal,120/80,70,8000,None\n", HEADER);
        assert!(matches!(
            Dataset::from_reader(csv.as_bytes()),
            Err(StressError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_blood_pressure_column_split() {
        let csv = format!("{}\n1,Female,29,Nurse,6.5,5,40,7,Normal,132/87,80,4000,Insomnia\n", HEADER);
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let record = &dataset.rows()[0].record;
        assert_eq!(record.blood_pressure, BloodPressure::new(132, 87));
    }

    #[test]
    fn test_pre_split_blood_pressure_columns() {
        let csv = "Gender,Age,Occupation,Sleep Duration,Quality of Sleep,Physical Activity Level,Stress Level,BMI Category,Systolic BP,Diastolic BP,Heart Rate,Daily Steps\n\
                   Male,30,Engineer,7.5,8,45,3,Normal,120,80,70,8000\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let record = &dataset.rows()[0].record;
        assert_eq!(record.blood_pressure, BloodPressure::new(120, 80));
        assert!(record.sleep_disorder.is_none());
    }

    #[test]
    fn test_missing_sleep_disorder_filled() {
        let csv = format!("{}\n1,Male,30,Doctor,7.6,7,75,6,Normal,120/80,70,8000,\n", HEADER);
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert!(dataset.rows()[0].record.sleep_disorder.is_none());
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Gender,Age,Occupation\nMale,30,Doctor\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, StressError::MissingColumn(_)));
        assert!(err.is_data_error());
    }

    #[test]
    fn test_missing_blood_pressure_column() {
        let csv = "Gender,Age,Occupation,Sleep Duration,Quality of Sleep,Physical Activity Level,Stress Level,BMI Category,Heart Rate,Daily Steps\n\
                   Male,30,Engineer,7.5,8,45,3,Normal,70,8000\n";
        match Dataset::from_reader(csv.as_bytes()) {
            Err(StressError::MissingColumn(col)) => assert_eq!(col, "Blood Pressure"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_dataset() {
        let csv = format!("{}\n", HEADER);
        assert!(matches!(
            Dataset::from_reader(csv.as_bytes()),
            Err(StressError::EmptyDataset)
        ));
    }

    #[test]
    fn test_invalid_cell_reports_row() {
        let csv = format!("{}\n1,Male,old,Doctor,7.6,7,75,6,Normal,120/80,70,8000,None\n", HEADER);
        match Dataset::from_reader(csv.as_bytes()) {
            Err(StressError::InvalidCell { column, row, .. }) => {
                assert_eq!(column, "Age");
                assert_eq!(row, 2);
            }
            other => panic!("expected invalid cell, got {:?}", other),
        }
    }

    #[test]
    fn test_float_formatted_counts() {
        let csv = format!("{}\n1,Male,30.0,Doctor,7.6,7,75.0,6,Normal,120/80,70,8000,None\n", HEADER);
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.rows()[0].record.age, 30);
    }

    #[test]
    fn test_normalize_bmi() {
        assert_eq!(normalize_bmi("Normal Weight"), "Normal");
        assert_eq!(normalize_bmi("Obese"), "Obese");
    }

    #[test]
    fn test_normalize_disorder() {
        assert_eq!(normalize_disorder("NaN"), None);
        assert_eq!(normalize_disorder(""), None);
        assert_eq!(normalize_disorder("None"), None);
        assert_eq!(normalize_disorder("Insomnia"), Some("Insomnia".to_string()));
    }
}
