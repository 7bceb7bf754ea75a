//! REPL application state and command handling.

use chrono::Timelike;
use colored::Colorize;
use pulse_core::chat::{ChatMessage, Conversation, Sender};
use pulse_core::dashboard::{self, ActivityStatus, TimeFrame, Trend};
use pulse_core::session::SessionManager;
use pulse_core::user::User;
use pulse_core::validation::{self, ValidationErrors};
use tokio::sync::watch;

use crate::command::{COMMANDS, Command};

/// Whether the REPL keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the REPL operates on, built once in `main`.
pub struct App {
    session: SessionManager,
    conversation: Conversation,
    /// Identity changes not yet announced
    identity: watch::Receiver<Option<User>>,
}

impl App {
    pub fn new(session: SessionManager, conversation: Conversation) -> Self {
        let identity = session.subscribe();
        Self {
            session,
            conversation,
            identity,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Restores the stored session and greets accordingly.
    pub async fn start(&mut self) {
        let restored = self.session.restore().await;
        self.identity.borrow_and_update();
        match restored {
            Some(user) => {
                println!("{}", format!("Welcome back, {}!", user.name).bright_green());
                print_greeting(Some(&user));
                self.print_message(&self.conversation.messages()[0]);
            }
            None => println!(
                "{}",
                "You are signed out. Use /login or /register to continue.".yellow()
            ),
        }
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                return Flow::Quit;
            }
            Command::Help => print_help(),
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Register {
                email,
                password,
                name,
            } => self.register(&name, &email, &password).await,
            Command::Logout => self.session.logout().await,
            Command::WhoAmI => match self.session.current_user() {
                Some(user) => println!("{} <{}> (id {})", user.name.bold(), user.email, user.id),
                None => println!("{}", "Not signed in.".bright_black()),
            },
            other if !self.session.is_authenticated() => {
                tracing::debug!(command = ?other, "Rejected command while signed out");
                println!("{}", "Please /login or /register first.".yellow());
            }
            Command::Stats => {
                print_greeting(self.session.current_user().as_ref());
                print_stats();
            }
            Command::Chart(time_frame) => print_chart(time_frame),
            Command::History => {
                for message in self.conversation.messages() {
                    self.print_message(message);
                }
            }
            Command::Chat(text) => self.chat(&text).await,
        }
        if let Some(notice) = self.identity_notice() {
            println!("{}", notice.bright_green());
        }
        Flow::Continue
    }

    /// Describes the latest identity change, once per change.
    pub fn identity_notice(&mut self) -> Option<String> {
        if !self.identity.has_changed().unwrap_or(false) {
            return None;
        }
        Some(match self.identity.borrow_and_update().as_ref() {
            Some(user) => format!("Signed in as {}.", user.name),
            None => "Signed out.".to_string(),
        })
    }

    async fn login(&mut self, email: &str, password: &str) {
        if let Err(errors) = validation::validate_login(email, password) {
            print_validation(&errors);
            return;
        }
        if let Err(e) = self.session.login(email, password).await {
            tracing::warn!(error = %e, "Login rejected");
            println!("{}", "Login failed. Please check your credentials.".red());
        }
    }

    async fn register(&mut self, name: &str, email: &str, password: &str) {
        if let Err(errors) = validation::validate_registration(name, email, password) {
            print_validation(&errors);
            return;
        }
        match self.session.register(name, email, password).await {
            Ok(_) => println!("{}", "Account created.".bright_green()),
            Err(e) => {
                tracing::warn!(error = %e, "Registration rejected");
                println!("{}", "Registration failed. Please try again.".red());
            }
        }
    }

    async fn chat(&mut self, text: &str) {
        let Some(pending) = self.conversation.submit(text) else {
            return;
        };
        println!("{}", "...".bright_black());
        let reply = pending.resolve().await;
        self.print_message(&reply);
        self.conversation.push(reply);
    }

    fn print_message(&self, message: &ChatMessage) {
        let time = message.timestamp.format("%H:%M");
        match message.sender {
            Sender::Bot => {
                println!("{}", format!("[{}] assistant", time).bright_magenta());
                for line in message.text.lines() {
                    println!("{}", line.bright_blue());
                }
            }
            Sender::User => println!("{}", format!("[{}] you: {}", time, message.text).green()),
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    let usage = [
        "<email> <password>",
        "<email> <password> <name...>",
        "",
        "",
        "",
        "[week|month|year]",
        "",
        "",
        "",
    ];
    for (cmd, args) in COMMANDS.iter().zip(usage) {
        println!("  {} {}", cmd.bright_cyan(), args.bright_black());
    }
    println!("{}", "Anything else is sent to the assistant.".bright_black());
}

fn print_validation(errors: &ValidationErrors) {
    for error in &errors.errors {
        println!("{}", format!("{}: {}", error.field, error.message).red());
    }
}

fn print_greeting(user: Option<&User>) {
    let hour = chrono::Local::now().hour();
    let name = user.map(|u| u.name.as_str());
    println!("{}", dashboard::greeting_line(hour, name).bold());
    println!("{}", "Here's your performance overview".bright_black());
}

fn print_stats() {
    for card in dashboard::stat_cards() {
        let change = match card.trend() {
            Trend::Up => card.change_label().green(),
            Trend::Down => card.change_label().red(),
            Trend::Flat => card.change_label().normal(),
        };
        println!("  {:<10} {:>9}  {}", card.title, card.value.bold(), change);
    }

    println!("{}", "Revenue trend (last 6 months)".bold());
    print_bars(&dashboard::revenue_trend());

    println!("{}", "Recent activity".bold());
    for activity in dashboard::recent_activity() {
        let marker = match activity.status {
            Some(ActivityStatus::Completed) => "ok".green(),
            Some(ActivityStatus::Failed) => "failed".red(),
            None => activity.kind.to_string().bright_cyan(),
        };
        println!(
            "  [{}] {} - {} {}",
            marker,
            activity.title.bold(),
            activity.description,
            activity.time.bright_black()
        );
    }
}

fn print_bars(series: &[dashboard::SeriesPoint]) {
    let max = series.iter().map(|p| p.value).max().unwrap_or(1).max(1);
    for point in series {
        let width = (point.value * 30 / max) as usize;
        println!("  {:<5} {} {}", point.label, "#".repeat(width).bright_blue(), point.value);
    }
}

fn print_chart(time_frame: TimeFrame) {
    println!("{}", format!("Activity ({})", time_frame).bold());
    print_bars(&dashboard::activity_series(time_frame));
    println!("{}", "Product share".bold());
    for share in dashboard::product_share() {
        println!("  {:<10} {:>3}%", share.name, share.percent);
    }

    let summary = dashboard::chart_summary();
    println!(
        "  Total revenue {}  Growth rate {}",
        summary.total_revenue.bold(),
        summary.growth_rate.green()
    );
    println!("{}", "Key insights".bold());
    for insight in dashboard::insights(time_frame) {
        println!("  - {}", insight);
    }
}
