//! Interactive chat that walks through the questionnaire
//!
//! Each line is either a `/command` or an answer to the current question.
//! When the last question is answered the record is scored, the result and
//! advice are printed, and the questionnaire starts over.

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::errors::StressError;
use crate::predict::{Prediction, Predictor};
use crate::questionnaire::{Choices, Questionnaire, Step};
use crate::repl::commands::{is_command, Command};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::InputHandler;
pub use crate::repl::session::{PredictionRecord, SessionHistory};

const DEFAULT_HISTORY_ROWS: usize = 10;

/// What a handled line led to
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Answer accepted or command run; keep going
    Continue,
    /// Answer rejected with the user-facing message
    Rejected(&'static str),
    /// Questionnaire finished and scored
    Predicted(Prediction),
    /// Scoring failed; the questionnaire was reset
    Failed(&'static str),
    Exit,
}

/// Chat session coordinator
pub struct ChatSession {
    predictor: Predictor,
    questionnaire: Questionnaire,
    history: SessionHistory,
    display: DisplayManager,
    input: Option<InputHandler>,
}

impl ChatSession {
    /// Session without a terminal editor; lines are fed via `handle_input`
    pub fn new(predictor: Predictor, history_limit: usize) -> Self {
        let choices = Choices::from_schema(predictor.model().schema());
        Self {
            predictor,
            questionnaire: Questionnaire::with_choices(choices),
            history: SessionHistory::new(history_limit),
            display: DisplayManager::new(),
            input: None,
        }
    }

    /// Attach a rustyline editor, optionally with persistent history
    pub fn with_terminal(mut self, history_path: Option<PathBuf>) -> Result<Self> {
        self.input = Some(InputHandler::open(history_path)?);
        Ok(self)
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn display(&self) -> &DisplayManager {
        &self.display
    }

    /// Print the current question
    pub fn prompt(&self) {
        if let Some(question) = self.questionnaire.current() {
            let choices = self.questionnaire.choices().for_question(question);
            self.display.show_question(
                question,
                &choices,
                self.questionnaire.position(),
                self.questionnaire.total(),
            );
        }
    }

    /// Handle one line of input
    pub fn handle_input(&mut self, input: &str) -> Outcome {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Outcome::Continue;
        }

        if is_command(trimmed) {
            return self.run_command(commands::parse(trimmed));
        }

        match self.questionnaire.answer(trimmed) {
            Ok(Step::Next(_)) => Outcome::Continue,
            Ok(Step::Complete(record)) => {
                let outcome = match self.predictor.predict(&record) {
                    Ok(prediction) => {
                        self.history.record(PredictionRecord::new(record, prediction));
                        Outcome::Predicted(prediction)
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "prediction failed");
                        Outcome::Failed(err.user_message())
                    }
                };
                self.questionnaire.restart();
                outcome
            }
            Err(err) => {
                tracing::debug!(error = %err, "answer rejected");
                Outcome::Rejected(err.user_message())
            }
        }
    }

    fn run_command(&mut self, command: Command) -> Outcome {
        match command {
            Command::Help => self.display.show_help(),
            Command::Restart => {
                self.questionnaire.restart();
                self.display.show_info("Starting over.");
            }
            Command::History { limit } => {
                let entries = self.history.recent(limit.unwrap_or(DEFAULT_HISTORY_ROWS));
                self.display.show_history(&entries);
            }
            Command::Status => self.show_status(),
            Command::Clear => {
                if let Err(err) = self.display.clear_screen() {
                    tracing::warn!(error = %err, "could not clear screen");
                }
            }
            Command::Exit => return Outcome::Exit,
            Command::Unknown { input } => {
                self.display.show_warning(&format!("Unknown command: {} (try /help)", input));
            }
        }
        Outcome::Continue
    }

    fn show_status(&self) {
        self.display.show_info(&format!(
            "Question {}/{} | Predictions this session: {} | Threshold policy: {}",
            (self.questionnaire.position() + 1).min(self.questionnaire.total()),
            self.questionnaire.total(),
            self.history.total(),
            self.predictor.policy().as_str()
        ));
        self.display.show_model_summary(self.predictor.model());
    }

    /// Render the outcome of a handled line
    fn render(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Rejected(message) => self.display.show_error(message),
            Outcome::Failed(message) => self.display.show_error(message),
            Outcome::Predicted(prediction) => {
                self.display.show_prediction(prediction);
                self.display.show_info("Answer again to run another check, or /exit to quit.");
            }
            Outcome::Continue | Outcome::Exit => {}
        }
    }

    /// Read-eval-print until /exit, Ctrl-D or Ctrl-C
    pub fn run(&mut self, version: &str) -> Result<()> {
        if self.input.is_none() {
            return Err(StressError::Generic("chat session has no terminal attached".to_string()).into());
        }

        self.display.show_banner(version);
        self.prompt();

        loop {
            let (position, total) = (self.questionnaire.position(), self.questionnaire.total());
            let line = match self.input.as_mut().map(|input| input.read_answer(position, total)) {
                Some(Ok(Some(line))) => line,
                Some(Ok(None)) => break,
                Some(Err(err)) => {
                    tracing::debug!(error = %err, "input ended");
                    break;
                }
                None => break,
            };

            let outcome = self.handle_input(&line);
            if outcome == Outcome::Exit {
                break;
            }
            self.render(&outcome);

            // Re-ask after anything that wasn't a blank line
            if !line.is_empty() {
                self.prompt();
            }
        }

        if let Some(input) = self.input.as_mut() {
            input.save_history()?;
        }
        println!("{}", "Take care!".green());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::model::{ForestParams, Trainer, TrainingOptions};
    use crate::predict::ThresholdPolicy;

    fn session() -> ChatSession {
        let dataset = Dataset::embedded().unwrap();
        let options = TrainingOptions {
            forest: ForestParams {
                n_estimators: 5,
                ..ForestParams::default()
            },
            ..TrainingOptions::default()
        };
        let model = Trainer::new(options).train(&dataset).unwrap();
        ChatSession::new(Predictor::new(model, ThresholdPolicy::Standard), 10)
    }

    #[test]
    fn test_blank_input_continues() {
        let mut chat = session();
        assert_eq!(chat.handle_input("   "), Outcome::Continue);
        assert_eq!(chat.questionnaire().position(), 0);
    }

    #[test]
    fn test_exit_command() {
        let mut chat = session();
        assert_eq!(chat.handle_input("/exit"), Outcome::Exit);
    }

    #[test]
    fn test_invalid_answer_rejected_with_generic_message() {
        let mut chat = session();
        assert_eq!(
            chat.handle_input("robot"),
            Outcome::Rejected(crate::errors::MSG_VALID_INPUT)
        );
        assert_eq!(chat.questionnaire().position(), 0);
    }

    #[test]
    fn test_restart_command() {
        let mut chat = session();
        chat.handle_input("Male");
        chat.handle_input("30");
        assert_eq!(chat.questionnaire().position(), 2);
        chat.handle_input("/restart");
        assert_eq!(chat.questionnaire().position(), 0);
    }

    #[test]
    fn test_full_conversation_predicts() {
        let mut chat = session();
        let answers = [
            "Male", "28", "Sales Representative", "5.9", "4", "30", "Obese", "140/90", "85", "3000", "Sleep Apnea",
        ];
        let mut last = Outcome::Continue;
        for answer in answers {
            last = chat.handle_input(answer);
        }

        match last {
            Outcome::Predicted(p) => assert!(p.score > 0.0),
            other => panic!("expected prediction, got {:?}", other),
        }
        assert_eq!(chat.history().len(), 1);
        assert_eq!(chat.questionnaire().position(), 0);
    }

    #[test]
    fn test_run_requires_terminal() {
        let mut chat = session();
        assert!(chat.run("test").is_err());
    }
}
