//! Line editor for questionnaire answers
//!
//! The prompt carries the question position so a user scrolling back through
//! warnings can still see where they are. Answers go into a persistent
//! history, so repeat check-ins can recall last time's values with the arrow
//! keys.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Answers kept across sessions; eleven per check-in
const MAX_HISTORY: usize = 550;

/// Prompt for the question at `position` (0-based) out of `total`
pub fn answer_prompt(position: usize, total: usize) -> String {
    if position < total {
        format!("[{}/{}] > ", position + 1, total)
    } else {
        "> ".to_string()
    }
}

/// rustyline editor with optional on-disk answer history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl InputHandler {
    /// Open the editor, loading history from `history_path` when it exists
    pub fn open(history_path: Option<PathBuf>) -> Result<Self> {
        let config = EditorConfig::builder()
            .max_history_size(MAX_HISTORY)?
            .history_ignore_dups(true)?
            .auto_add_history(false)
            .build();
        let mut editor = DefaultEditor::with_config(config)?;

        if let Some(path) = history_path.as_ref().filter(|p| p.exists()) {
            if let Err(err) = editor.load_history(path) {
                tracing::warn!(path = %path.display(), error = %err, "could not load answer history");
            }
        }

        Ok(InputHandler { editor, history_path })
    }

    /// Read the answer to the question at `position`.
    ///
    /// `Ok(None)` on Ctrl-D or Ctrl-C. Blank lines come back as an empty
    /// string and are not remembered.
    pub fn read_answer(&mut self, position: usize, total: usize) -> Result<Option<String>> {
        match self.editor.readline(&answer_prompt(position, total)) {
            Ok(line) => {
                let answer = line.trim();
                if !answer.is_empty() {
                    self.editor.add_history_entry(answer)?;
                }
                Ok(Some(answer.to_string()))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Write history back to disk; no-op without a history path
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(path) = &self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prompt_shows_position() {
        assert_eq!(answer_prompt(0, 11), "[1/11] > ");
        assert_eq!(answer_prompt(10, 11), "[11/11] > ");
    }

    #[test]
    fn test_prompt_past_last_question() {
        assert_eq!(answer_prompt(11, 11), "> ");
    }

    #[test]
    fn test_open_without_history() {
        let handler = InputHandler::open(None).unwrap();
        assert!(handler.history_path.is_none());
    }

    #[test]
    fn test_missing_history_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history");
        assert!(InputHandler::open(Some(path.clone())).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn test_answer_history_persists() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("nested").join("history");

        {
            let mut handler = InputHandler::open(Some(history_path.clone())).unwrap();
            handler.editor.add_history_entry("Male").unwrap();
            handler.editor.add_history_entry("140/90").unwrap();
            handler.save_history().unwrap();
        }

        let saved = std::fs::read_to_string(&history_path).unwrap();
        assert!(saved.contains("Male"));
        assert!(saved.contains("140/90"));
        assert!(InputHandler::open(Some(history_path)).is_ok());
    }
}
