//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Line-editor history file (defaults to the platform data dir)
    pub history_file: Option<String>,
    /// Show the "Thinking.." spinner while waiting for the first chunk
    pub show_spinner: bool,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            history_file: None,
            show_spinner: true,
        }
    }
}

impl FileReplConfig {
    /// Resolved history path, if any location is available.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => dirs::data_dir().map(|d| d.join("solochat").join("history.txt")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_history_file() {
        let config = FileReplConfig {
            history_file: Some("/tmp/h.txt".to_string()),
            ..Default::default()
        };
        assert_eq!(config.history_path(), Some(PathBuf::from("/tmp/h.txt")));
    }

    #[test]
    fn test_default_history_under_data_dir() {
        if let Some(path) = FileReplConfig::default().history_path() {
            assert!(path.ends_with("solochat/history.txt"));
        }
    }
}
