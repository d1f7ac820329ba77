//! Error types for StressBuddy
//!
//! Library code returns typed errors; the terminal layers collapse them into
//! the three messages a user actually sees.

use thiserror::Error;

/// Shown when the dataset cannot be used.
pub const MSG_UPLOAD_CSV: &str = "Please upload the required dataset (CSV) to proceed.";

/// Shown when an answer or flag value is rejected.
pub const MSG_VALID_INPUT: &str = "Please provide a valid input.";

/// Shown for everything else.
pub const MSG_TRY_AGAIN: &str = "An error occurred, please try again.";

/// Main error type for the stress estimation pipeline
#[derive(Error, Debug)]
pub enum StressError {
    /// Dataset file could not be opened
    #[error("Cannot open dataset {path}: {source}")]
    DatasetUnavailable {
        path: String,
        source: std::io::Error,
    },

    /// A required dataset column is absent
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),

    /// A dataset cell could not be interpreted
    #[error("Invalid value '{value}' in column '{column}' (row {row})")]
    InvalidCell {
        column: String,
        value: String,
        row: usize,
    },

    /// Dataset had no usable rows after cleaning
    #[error("Dataset contains no usable rows")]
    EmptyDataset,

    /// A user-supplied value failed validation
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Encoded row does not line up with the training columns
    #[error("Feature width mismatch: model expects {expected} columns, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    /// Model used before fitting, or fitted on nothing
    #[error("Model error: {0}")]
    ModelError(String),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, StressError>;

impl StressError {
    /// Build an input validation error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StressError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the dataset itself is at fault
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            StressError::DatasetUnavailable { .. }
                | StressError::MissingColumn(_)
                | StressError::InvalidCell { .. }
                | StressError::EmptyDataset
                | StressError::Csv(_)
        )
    }

    /// Whether the user's answer is at fault
    pub fn is_input_error(&self) -> bool {
        matches!(self, StressError::InvalidInput { .. })
    }

    /// Collapse into the message shown to the user.
    ///
    /// The cause is logged at debug level so it is still recoverable with `-vv`.
    pub fn user_message(&self) -> &'static str {
        tracing::debug!(error = %self, "collapsing error for display");
        if self.is_data_error() {
            MSG_UPLOAD_CSV
        } else if self.is_input_error() {
            MSG_VALID_INPUT
        } else {
            MSG_TRY_AGAIN
        }
    }
}

/// Convert anyhow errors to StressError
impl From<anyhow::Error> for StressError {
    fn from(err: anyhow::Error) -> Self {
        StressError::Generic(err.to_string())
    }
}
