//! StressBuddy - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use stressbuddy::cli::{Args, Commands, Config, PredictArgs, Verbosity};
use stressbuddy::errors::{StressError, MSG_TRY_AGAIN};
use stressbuddy::questionnaire::{Choices, Questionnaire};
use stressbuddy::repl::{ChatSession, DisplayManager};
use stressbuddy::{Dataset, OneHotEncoder, Predictor, TrainedModel, Trainer};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args = Args::parse();

    if let Err(msg) = args.validate() {
        eprintln!("{} {}", "Error:".red().bold(), msg);
        std::process::exit(2);
    }

    let config = match Config::load(args.config.clone()) {
        Ok(config) => config,
        Err(err) => {
            init_logging(args.verbosity());
            tracing::debug!(error = %err, "configuration rejected");
            DisplayManager::new().show_error(err.user_message());
            std::process::exit(2);
        }
    };

    // Flags win over the configured default
    let verbosity = if args.quiet || args.verbose > 0 {
        args.verbosity()
    } else {
        config.default_verbosity()
    };
    init_logging(verbosity);

    if !config.display.color_output {
        DisplayManager::set_color(false);
    }

    if let Err(err) = run(&args, &config, verbosity) {
        tracing::debug!("{:#}", err);
        let message = err
            .downcast_ref::<StressError>()
            .map(StressError::user_message)
            .unwrap_or(MSG_TRY_AGAIN);
        DisplayManager::new().show_error(message);
        std::process::exit(1);
    }
}

/// Structured logging to stderr so JSON output on stdout stays clean.
/// `RUST_LOG` overrides the verbosity flags.
fn init_logging(verbosity: Verbosity) {
    let level = verbosity.level_filter();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,stressbuddy={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args, config: &Config, verbosity: Verbosity) -> Result<()> {
    match &args.command {
        None | Some(Commands::Chat) => run_chat(args, config, verbosity),
        Some(Commands::Predict(predict)) => run_predict(args, config, verbosity, predict),
        Some(Commands::Train) => run_train(args, config, verbosity),
        Some(Commands::Schema { json }) => run_schema(args, config, *json),
        Some(Commands::Config { save }) => run_config(config, *save),
    }
}

fn load_dataset(args: &Args, config: &Config) -> Result<Dataset> {
    let dataset = match config.dataset_path(args.dataset.as_deref()) {
        Some(path) => Dataset::from_path(&path)?,
        None => {
            tracing::info!("no dataset given, using embedded sample");
            Dataset::embedded()?
        }
    };
    Ok(dataset)
}

fn display_for(config: &Config, verbosity: Verbosity) -> DisplayManager {
    if config.display.show_progress && verbosity.show_progress() {
        DisplayManager::new()
    } else {
        DisplayManager::new().without_progress()
    }
}

/// Fit once; the model lives for the rest of the process
fn train_model(args: &Args, config: &Config, display: &mut DisplayManager) -> Result<TrainedModel> {
    let dataset = load_dataset(args, config)?;
    train_on(&dataset, config, display)
}

fn train_on(dataset: &Dataset, config: &Config, display: &mut DisplayManager) -> Result<TrainedModel> {
    let trainer = Trainer::new(config.model.training_options());

    display.start_training(dataset.len());
    match trainer.train(dataset) {
        Ok(model) => {
            display.finish_current();
            Ok(model)
        }
        Err(err) => {
            display.finish_with_error("Training failed");
            Err(err.into())
        }
    }
}

fn run_chat(args: &Args, config: &Config, verbosity: Verbosity) -> Result<()> {
    let mut display = display_for(config, verbosity);
    let model = train_model(args, config, &mut display)?;
    if verbosity.show_details() {
        display.show_model_summary(&model);
    }

    let predictor = Predictor::new(model, config.prediction.threshold_policy);
    let history_path = dirs::home_dir().map(|home| home.join(".stressbuddy").join("history"));

    let mut chat = ChatSession::new(predictor, config.display.history_limit).with_terminal(history_path)?;
    chat.run(VERSION)
}

fn run_predict(args: &Args, config: &Config, verbosity: Verbosity, predict: &PredictArgs) -> Result<()> {
    // Validate against the dataset's levels before paying for training
    let dataset = load_dataset(args, config)?;
    let choices = Choices::from_schema(&OneHotEncoder::fit(&dataset.records()));
    let record = Questionnaire::run_all_with(&predict.answers(), choices)?;

    let mut display = if predict.json {
        DisplayManager::new().without_progress()
    } else {
        display_for(config, verbosity)
    };
    let model = train_on(&dataset, config, &mut display)?;
    let predictor = Predictor::new(model, config.prediction.threshold_policy);
    let prediction = predictor.predict(&record)?;

    if predict.json {
        println!("{}", prediction.to_json()?);
    } else {
        display.show_prediction(&prediction);
    }
    Ok(())
}

fn run_train(args: &Args, config: &Config, verbosity: Verbosity) -> Result<()> {
    let mut display = display_for(config, verbosity);
    let model = train_model(args, config, &mut display)?;
    display.finish_with_success("Model trained", model.duration_ms());
    display.show_model_summary(&model);
    Ok(())
}

fn run_schema(args: &Args, config: &Config, json: bool) -> Result<()> {
    let dataset = load_dataset(args, config)?;
    let schema = OneHotEncoder::fit(&dataset.records());

    if json {
        println!("{}", schema.to_json()?);
        return Ok(());
    }

    let display = DisplayManager::new();
    display.show_section(&format!("Feature Columns ({})", schema.len()));
    for (i, column) in schema.columns().iter().enumerate() {
        println!("  {:>3}. {}", i + 1, column);
    }

    display.show_section("Reference Levels (encoded as all zeros)");
    for (field, level) in schema.reference_levels() {
        display.show_bullet(&format!("{}: {}", field.column(), level));
    }
    println!();
    Ok(())
}

fn run_config(config: &Config, save: bool) -> Result<()> {
    let path = Config::default_path();
    if let Some(path) = &path {
        println!("{}", format!("# {}", path.display()).dimmed());
    }
    print!("{}", config.to_toml()?);

    if save {
        let path = path.ok_or_else(|| StressError::ConfigError("no home directory for config file".to_string()))?;
        config.save(&path)?;
        DisplayManager::new().show_info(&format!("Saved to {}", path.display()));
    }
    Ok(())
}
