use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;

use pulse_core::chat::{Conversation, KeywordResponder};
use pulse_core::session::{MockAuthProvider, SessionManager};
use pulse_infrastructure::{ConfigService, JsonFileKeyValueStore, PulsePaths};

mod app;
mod command;
mod helper;
mod logging;

use app::{App, Flow};
use command::Command;
use helper::CliHelper;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "PULSE - analytics companion in your terminal", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the session store and logs
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Entry point for the Pulse REPL.
///
/// 1. Resolves paths and loads configuration
/// 2. Installs file logging
/// 3. Wires the session manager and conversation (composition root)
/// 4. Restores the previous session, then reads commands until quit
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ===== Configuration =====
    let mut paths = PulsePaths::platform()?;
    if let Some(data_dir) = cli.data_dir {
        paths = paths.with_data_dir(data_dir);
    }
    let config_path = cli.config.unwrap_or_else(|| paths.config_file());
    let config = ConfigService::new(config_path).load().await?;

    let _log_guard = logging::init(&paths.logs_dir(), &config.log_level)?;
    tracing::info!(data_dir = %paths.data_dir().display(), "Starting pulse");

    // ===== Backend Initialization =====
    let store = Arc::new(JsonFileKeyValueStore::new(
        paths.storage_file(&config.storage.file_name),
    ));
    let auth = Arc::new(MockAuthProvider::new(config.auth.latency()));
    let session = SessionManager::new(auth, store);
    let conversation = Conversation::new(Arc::new(KeywordResponder::default()), config.chat.clone());
    let mut app = App::new(session, conversation);

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Pulse ===".bright_magenta().bold());
    println!("{}", "Type /help for commands, or 'quit' to exit.".bright_black());
    app.start().await;
    println!();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e.to_string().yellow());
                        continue;
                    }
                };
                if app.handle(command).await == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    tracing::info!("Exiting pulse");
    Ok(())
}
