//! Terminal output for the chat and one-shot commands

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

use crate::model::TrainedModel;
use crate::predict::Prediction;
use crate::questionnaire::Question;
use crate::repl::commands::HELP;
use crate::repl::session::PredictionRecord;

/// Display manager for terminal UI
pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    show_progress: bool,
    update_interval: Duration,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            show_progress: true,
            update_interval: Duration::from_millis(100),
        }
    }

    /// Turn spinners off (quiet mode, non-interactive output)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Globally enable or disable ANSI colors
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    pub fn show_banner(&self, version: &str) {
        let width = 64;
        println!("\n{}", "=".repeat(width).cyan());
        println!("{}", format!("  Mental Stress Manager {}", version).bold().cyan());
        println!("{}", "  Your sleep and lifestyle stress check-in".dimmed());
        println!("{}\n", "=".repeat(width).cyan());
        println!(
            "Answer each question (or {} for commands, {} to quit)\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Spinner shown while the model is fitted
    pub fn start_training(&mut self, rows: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        self.finish_current();

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Training model on {} rows...", rows));
        pb.enable_steady_tick(self.update_interval);

        self.current_bar = Some(pb.clone());
        Some(pb)
    }

    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    pub fn finish_with_success(&mut self, message: &str, duration_ms: u64) {
        self.finish_current();
        println!("{} {} {}", "✓".green(), message, format!("({}ms)", duration_ms).dimmed());
    }

    /// Replace a running spinner with a failure line on stderr
    pub fn finish_with_error(&mut self, message: &str) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
            eprintln!("{} {}", "✗".red(), message.red());
        }
    }

    /// Print a question with its position and choices
    pub fn show_question(&self, question: &Question, choices: &[&str], index: usize, total: usize) {
        println!(
            "{} {}",
            format!("[{}/{}]", index + 1, total).dimmed(),
            question.prompt.bold()
        );
        if !choices.is_empty() {
            let choices: Vec<String> = choices
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}. {}", i + 1, c))
                .collect();
            println!("    {}", choices.join("  ").dimmed());
        }
    }

    /// Score, label and the advice block
    pub fn show_prediction(&self, prediction: &Prediction) {
        let advice = prediction.advice();

        self.show_section("Your Stress Assessment");
        println!(
            "  Predicted stress level: {} {}",
            prediction.level.colored(),
            format!("(score {:.2})", prediction.score).dimmed()
        );
        println!("\n  {}", advice.headline.bold());
        println!("  {}\n", advice.summary);
        for tip in advice.tips {
            self.show_bullet(tip);
        }
        println!();
    }

    pub fn show_model_summary(&self, model: &TrainedModel) {
        self.show_section("Model");
        println!("  Training rows:   {}", model.train_rows());
        println!("  Held-out rows:   {}", model.test_rows());
        println!("  Feature columns: {}", model.schema().len());
        match model.metrics() {
            Some(m) => {
                println!("  R²:              {:.3}", m.r2);
                println!("  MAE:             {:.3}", m.mae);
                println!("  RMSE:            {:.3}", m.rmse);
            }
            None => println!("  {}", "No held-out rows; metrics unavailable".dimmed()),
        }
        println!();
    }

    pub fn show_history(&self, entries: &[&PredictionRecord]) {
        if entries.is_empty() {
            self.show_info("No predictions yet.");
            return;
        }
        self.show_section("Recent Predictions");
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "  {}. {} {} {} {}",
                (i + 1).to_string().cyan(),
                entry.timestamp.format("%H:%M:%S").to_string().dimmed(),
                entry.level.colored(),
                format!("{:.2}", entry.score).dimmed(),
                entry.record.occupation
            );
        }
        println!();
    }

    pub fn show_help(&self) {
        self.show_section("Available Commands");
        for (cmd, desc) in HELP {
            println!("  {:<20} {}", cmd.green(), desc);
        }
        println!("\nType your answer directly (no / prefix). Choices accept their number.\n");
    }

    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }

    pub fn show_bullet(&self, text: &str) {
        println!("  {} {}", "•".cyan(), text);
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::StressLevel;
    use crate::questionnaire::QUESTIONS;

    #[test]
    fn test_display_manager_creation() {
        let manager = DisplayManager::new();
        assert!(manager.current_bar.is_none());
        assert_eq!(manager.update_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_start_training_tracks_bar() {
        let mut manager = DisplayManager::new();
        let pb = manager.start_training(80);
        assert!(pb.is_some());
        assert!(manager.current_bar.is_some());
        manager.finish_with_success("Model ready", 12);
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_no_spinner_without_progress() {
        let mut manager = DisplayManager::new().without_progress();
        assert!(manager.start_training(80).is_none());
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_finish_with_error() {
        let mut manager = DisplayManager::new();
        let _pb = manager.start_training(10);
        manager.finish_with_error("Training failed");
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_render_calls_do_not_panic() {
        let manager = DisplayManager::new();
        manager.show_question(&QUESTIONS[0], QUESTIONS[0].choices, 0, QUESTIONS.len());
        manager.show_question(&QUESTIONS[1], &[], 1, QUESTIONS.len());
        manager.show_question(&QUESTIONS[2], &["Chef", "Others"], 2, QUESTIONS.len());
        manager.show_prediction(&Prediction {
            score: 7.4,
            level: StressLevel::High,
        });
        manager.show_history(&[]);
        manager.show_help();
        manager.show_error("Test error");
        manager.show_warning("Test warning");
        manager.show_info("Test info");
    }
}
