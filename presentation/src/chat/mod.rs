//! Interactive chat module
//!
//! Provides a readline-based multi-session chat interface.

mod command;
mod repl;

pub use command::ReplInput;
pub use repl::{ChatRepl, Flow};
