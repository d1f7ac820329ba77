//! Configuration management for StressBuddy
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.stressbuddy/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::args::Verbosity;
use crate::errors::{Result, StressError};
use crate::model::{ForestParams, TrainingOptions, TreeParams};
use crate::predict::ThresholdPolicy;

/// Complete configuration for StressBuddy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub prediction: PredictionConfig,
    pub display: DisplayConfig,
}

/// Where training data comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV path; the embedded sample is used when unset
    pub dataset: Option<String>,
}

/// Random forest and split parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: Option<usize>,
    pub seed: u64,
    pub test_fraction: f64,
}

/// Score to label mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub threshold_policy: ThresholdPolicy,
}

/// Terminal output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_verbosity: String,
    pub color_output: bool,
    pub show_progress: bool,
    /// Predictions kept in the chat session history
    pub history_limit: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
            test_fraction: 0.2,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
            show_progress: true,
            history_limit: 50,
        }
    }
}

impl ModelConfig {
    /// Parameters for the trainer
    pub fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            forest: ForestParams {
                n_estimators: self.n_estimators,
                tree: TreeParams {
                    max_depth: self.max_depth,
                    min_samples_split: self.min_samples_split,
                    min_samples_leaf: self.min_samples_leaf,
                    max_features: self.max_features,
                },
                bootstrap: true,
                seed: self.seed,
            },
            test_fraction: self.test_fraction,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StressError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| StressError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// `~/.stressbuddy/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".stressbuddy").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.model.n_estimators == 0 {
            return Err(StressError::ConfigError(
                "n_estimators must be greater than 0".to_string(),
            ));
        }

        if self.model.min_samples_split < 2 {
            return Err(StressError::ConfigError(
                "min_samples_split must be at least 2".to_string(),
            ));
        }

        if self.model.min_samples_leaf == 0 {
            return Err(StressError::ConfigError(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }

        if self.model.max_features == Some(0) {
            return Err(StressError::ConfigError(
                "max_features must be greater than 0 when set".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.model.test_fraction) {
            return Err(StressError::ConfigError(
                "test_fraction must be in [0.0, 1.0)".to_string(),
            ));
        }

        if self.display.history_limit == 0 {
            return Err(StressError::ConfigError(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        if Verbosity::from_name(&self.display.default_verbosity).is_none() {
            return Err(StressError::ConfigError(format!(
                "Invalid verbosity level: {}",
                self.display.default_verbosity
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StressError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| StressError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| StressError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Dataset path, command line taking precedence over the file
    pub fn dataset_path(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.data.dataset.as_deref().map(Self::expand_path))
    }

    /// Verbosity from the file, used when no flag is given
    pub fn default_verbosity(&self) -> Verbosity {
        Verbosity::from_name(&self.display.default_verbosity).unwrap_or(Verbosity::Normal)
    }
}
