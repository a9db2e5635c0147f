//! Console rendering of the session list and transcripts

use colored::Colorize;
use solochat_domain::{Role, Session, SessionStore, Turn};

/// Formats chat state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn welcome(model: &str) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str("╭─────────────────────────────────────────────╮\n");
        output.push_str("│                  SoloChat                   │\n");
        output.push_str("╰─────────────────────────────────────────────╯\n");
        output.push('\n');
        output.push_str(&format!("{} {}\n\n", "Model:".cyan().bold(), model));
        output.push_str(&Self::help());
        output
    }

    pub fn help() -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Commands:".cyan().bold()));
        for (command, description) in [
            ("/new", "Start a new chat"),
            ("/list", "List chats (newest first)"),
            ("/switch <n|id>", "Switch to a chat by list number or id"),
            ("/delete <n|id>", "Delete a chat"),
            ("/history", "Show the current chat"),
            ("/title", "Show the current chat title"),
            ("/help", "Show this help"),
            ("/quit", "Exit"),
        ] {
            output.push_str(&format!("  {:<16} - {}\n", command, description));
        }
        output.push('\n');
        output
    }

    /// The session list, marking the active entry.
    pub fn sidebar(store: &SessionStore) -> String {
        let entries = store.sidebar();
        let mut output = format!("{}\n", "Chats".cyan().bold());

        if entries.is_empty() {
            output.push_str(&format!("  {}\n", "(no conversations yet)".dimmed()));
            return output;
        }

        for entry in entries {
            let line = format!(
                "{:>3}. {:<20}  {}",
                entry.position,
                entry.label,
                entry.id.short()
            );
            if entry.is_active {
                output.push_str(&format!("{} {}\n", ">".green().bold(), line.bold()));
            } else {
                output.push_str(&format!("  {}\n", line));
            }
        }

        if store.active().is_some_and(Session::is_empty) {
            output.push_str(&format!("  {}\n", "(current chat is new)".dimmed()));
        }
        output
    }

    /// Every turn of one session.
    pub fn transcript(session: &Session) -> String {
        let mut output = Self::title(session);
        if session.is_empty() {
            output.push_str(&format!("{}\n", "No messages yet.".dimmed()));
            return output;
        }
        for turn in session.turns() {
            output.push_str(&Self::turn(turn));
        }
        output
    }

    pub fn title(session: &Session) -> String {
        format!(
            "{} {}\n",
            "──".cyan(),
            session.title().cyan().bold()
        )
    }

    fn turn(turn: &Turn) -> String {
        format!("{}\n{}\n\n", Self::speaker(turn.role), turn.content)
    }

    /// Label printed above a turn.
    pub fn speaker(role: Role) -> String {
        match role {
            Role::User => "You:".green().bold().to_string(),
            Role::Assistant => "Assistant:".yellow().bold().to_string(),
        }
    }

    pub fn warning(message: &str) -> String {
        format!("{} {}", "Warning:".yellow().bold(), message)
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Dimmed informational line.
    pub fn notice(message: &str) -> String {
        message.dimmed().to_string()
    }
}
