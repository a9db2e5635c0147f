//! Presentation-level configuration
//!
//! REPL behavior, assembled by the binary from the loaded config file and
//! command-line flags.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Line-editor history file; `None` disables persistence
    pub history_file: Option<PathBuf>,
    /// Show the "Thinking.." spinner before the first chunk
    pub show_spinner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_file: None,
            show_spinner: true,
        }
    }
}
