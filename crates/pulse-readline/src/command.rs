//! REPL command parsing.

use std::str::FromStr;

use pulse_core::dashboard::TimeFrame;

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/login", "/register", "/logout", "/whoami", "/stats", "/chart", "/history", "/help", "/quit",
];

/// One parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register { email: String, password: String, name: String },
    Logout,
    WhoAmI,
    Stats,
    Chart(TimeFrame),
    History,
    Help,
    Quit,
    /// Anything that is not a slash command goes to the assistant.
    Chat(String),
}

/// Why a slash command could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Usage(&'static str),
    Unknown(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Usage(usage) => write!(f, "Usage: {}", usage),
            ParseError::Unknown(cmd) => write!(f, "Unknown command: {} (try /help)", cmd),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            return Ok(Command::Quit);
        }
        if !trimmed.starts_with('/') {
            return Ok(Command::Chat(line.to_string()));
        }

        let mut parts = trimmed.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match name {
            "/login" => match args.as_slice() {
                [email, password] => Ok(Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                }),
                _ => Err(ParseError::Usage("/login <email> <password>")),
            },
            "/register" => match args.as_slice() {
                [email, password, name @ ..] if !name.is_empty() => Ok(Command::Register {
                    email: email.to_string(),
                    password: password.to_string(),
                    name: name.join(" "),
                }),
                _ => Err(ParseError::Usage("/register <email> <password> <name...>")),
            },
            "/logout" => Ok(Command::Logout),
            "/whoami" => Ok(Command::WhoAmI),
            "/stats" => Ok(Command::Stats),
            "/chart" => match args.as_slice() {
                [] => Ok(Command::Chart(TimeFrame::default())),
                [frame] => TimeFrame::from_str(frame)
                    .map(Command::Chart)
                    .map_err(|_| ParseError::Usage("/chart [week|month|year]")),
                _ => Err(ParseError::Usage("/chart [week|month|year]")),
            },
            "/history" => Ok(Command::History),
            "/help" => Ok(Command::Help),
            "/quit" | "/exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}
