//! Presentation layer for solochat
//!
//! This crate contains CLI definitions, console formatting, the streaming
//! progress reporter, and the interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, Flow, ReplInput};
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::StreamingReporter;
