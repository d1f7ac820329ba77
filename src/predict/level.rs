//! Stress labels and the thresholds that produce them

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, StressError};

/// Coarse stress label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Medium => "Medium",
            StressLevel::High => "High",
        }
    }

    /// Label colored for terminal output
    pub fn colored(&self) -> ColoredString {
        match self {
            StressLevel::Low => self.as_str().green().bold(),
            StressLevel::Medium => self.as_str().yellow().bold(),
            StressLevel::High => self.as_str().red().bold(),
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a continuous score maps to a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// `> 7` High, `> 4` Medium, otherwise Low
    #[default]
    Standard,
    /// `< 5` Low, `5..=7` Medium, `> 7` High
    Banded,
}

impl ThresholdPolicy {
    pub fn classify(&self, score: f64) -> StressLevel {
        match self {
            ThresholdPolicy::Standard => {
                if score > 7.0 {
                    StressLevel::High
                } else if score > 4.0 {
                    StressLevel::Medium
                } else {
                    StressLevel::Low
                }
            }
            ThresholdPolicy::Banded => {
                if score < 5.0 {
                    StressLevel::Low
                } else if score <= 7.0 {
                    StressLevel::Medium
                } else {
                    StressLevel::High
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdPolicy::Standard => "standard",
            ThresholdPolicy::Banded => "banded",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "standard" => Ok(ThresholdPolicy::Standard),
            "banded" => Ok(ThresholdPolicy::Banded),
            other => Err(StressError::ConfigError(format!("Unknown threshold policy: {}", other))),
        }
    }
}
