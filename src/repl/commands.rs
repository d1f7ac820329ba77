//! Built-in chat commands

/// Chat command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Restart,
    History { limit: Option<usize> },
    Status,
    Clear,
    Exit,
    Unknown { input: String },
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

/// Parse input string into a command
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(body) = trimmed.strip_prefix('/') else {
        return Command::Unknown { input: input.to_string() };
    };

    let parts: Vec<&str> = body.split_whitespace().collect();
    let Some(name) = parts.first() else {
        return Command::Unknown { input: input.to_string() };
    };

    match name.to_lowercase().as_str() {
        "help" | "h" => Command::Help,
        "restart" | "reset" => Command::Restart,
        "history" => Command::History {
            limit: parts.get(1).and_then(|s| s.parse().ok()),
        },
        "status" => Command::Status,
        "clear" | "cls" => Command::Clear,
        "exit" | "quit" | "q" => Command::Exit,
        _ => Command::Unknown { input: input.to_string() },
    }
}

/// Command names and descriptions for /help
pub const HELP: &[(&str, &str)] = &[
    ("/help, /h", "Show this help message"),
    ("/restart", "Start the questionnaire over"),
    ("/history [n]", "Show last n predictions (default: 10)"),
    ("/status", "Show progress and model details"),
    ("/clear, /cls", "Clear screen"),
    ("/exit, /quit, /q", "Exit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_command() {
        assert!(is_command("/help"));
        assert!(is_command("  /exit"));
        assert!(!is_command("Male"));
        assert!(!is_command("120/80"));
    }

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/H"), Command::Help);
        assert_eq!(parse("/restart"), Command::Restart);
        assert_eq!(parse("/status"), Command::Status);
        assert_eq!(parse("/cls"), Command::Clear);
        assert_eq!(parse("/quit"), Command::Exit);
    }

    #[test]
    fn test_parse_history_limit() {
        assert_eq!(parse("/history"), Command::History { limit: None });
        assert_eq!(parse("/history 3"), Command::History { limit: Some(3) });
        assert_eq!(parse("/history x"), Command::History { limit: None });
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/dance"), Command::Unknown { input: "/dance".to_string() });
        assert_eq!(parse("/"), Command::Unknown { input: "/".to_string() });
    }
}
