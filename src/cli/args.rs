//! Command-line argument parsing for StressBuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// StressBuddy - estimate your stress level from sleep and lifestyle habits
#[derive(Parser, Debug)]
#[command(name = "stressbuddy")]
#[command(author = "Team Z Data Knights")]
#[command(version)]
#[command(about = "Estimate a coarse stress level from sleep and lifestyle attributes", long_about = None)]
pub struct Args {
    /// Sleep Health and Lifestyle CSV to train on (embedded sample by default)
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand (interactive chat when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer the questionnaire interactively
    Chat,

    /// Predict once from command-line values
    Predict(PredictArgs),

    /// Train the model and report held-out metrics
    Train,

    /// Show the encoded feature columns and reference levels
    Schema {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display current configuration
    Config {
        /// Also write it to the default config file
        #[arg(long)]
        save: bool,
    },
}

/// Attribute values for a one-shot prediction
#[derive(ClapArgs, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long)]
    pub gender: String,

    #[arg(long)]
    pub age: String,

    /// Unknown occupations are treated as "Others"
    #[arg(long)]
    pub occupation: String,

    /// Hours per night
    #[arg(long)]
    pub sleep_duration: String,

    /// 1-10
    #[arg(long)]
    pub sleep_quality: String,

    /// Minutes per day
    #[arg(long)]
    pub physical_activity: String,

    #[arg(long)]
    pub bmi_category: String,

    /// e.g. 120/80
    #[arg(long)]
    pub blood_pressure: String,

    #[arg(long)]
    pub heart_rate: String,

    #[arg(long)]
    pub daily_steps: String,

    #[arg(long, default_value = "None")]
    pub sleep_disorder: String,

    /// Print the prediction as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    /// Values in questionnaire order
    pub fn answers(&self) -> [&str; 11] {
        [
            &self.gender,
            &self.age,
            &self.occupation,
            &self.sleep_duration,
            &self.sleep_quality,
            &self.physical_activity,
            &self.bmi_category,
            &self.blood_pressure,
            &self.heart_rate,
            &self.daily_steps,
            &self.sleep_disorder,
        ]
    }
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Reject flag combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose > 0 {
            return Err("Cannot combine --quiet with --verbose.".to_string());
        }
        Ok(())
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse the config file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Log level for the tracing subscriber
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::ERROR,
            Verbosity::Normal => LevelFilter::WARN,
            Verbosity::Verbose => LevelFilter::INFO,
            Verbosity::VeryVerbose => LevelFilter::DEBUG,
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show training details
    pub fn show_details(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}
