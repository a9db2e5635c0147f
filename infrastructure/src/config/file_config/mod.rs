//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types by
//! the binary.

mod logging;
mod model;
mod output;
mod providers;
mod repl;

pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use output::FileOutputConfig;
pub use providers::{FileGeminiConfig, FileProvidersConfig};
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use solochat_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model selection
    pub model: FileModelConfig,
    /// Provider settings (credential lookup, endpoint, timeouts)
    pub providers: FileProvidersConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.model.parse().1);
        issues.extend(self.providers.gemini.validate());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solochat_domain::{ConfigIssueCode, Severity};

    #[test]
    fn test_full_config_parses() {
        let toml_str = r#"
[model]
name = "gemini-2.5-flash"

[providers.gemini]
api_key_env = "MY_GEMINI_KEY"
base_url = "http://localhost:8080/v1beta"
connect_timeout_secs = 5
read_timeout_secs = 60

[repl]
history_file = "/tmp/solochat_history.txt"
show_spinner = false

[output]
color = false

[logging]
conversation_log = "/tmp/solochat.jsonl"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert_eq!(config.providers.gemini.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.providers.gemini.connect_timeout_secs, 5);
        assert_eq!(
            config.repl.history_file.as_deref(),
            Some("/tmp/solochat_history.txt")
        );
        assert!(!config.repl.show_spinner);
        assert!(!config.output.color);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("/tmp/solochat.jsonl")
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.model.name, "gemma-3-12b-it");
        assert!(config.repl.show_spinner);
        assert!(config.logging.conversation_log.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[model]
name = ""

[providers.gemini]
api_key_env = " "
read_timeout_secs = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| i.code
            == ConfigIssueCode::EmptyValue {
                field: "model.name".to_string()
            }));
        assert!(issues.iter().any(|i| i.code
            == ConfigIssueCode::OutOfRange {
                field: "providers.gemini.read_timeout_secs".to_string(),
                value: 0
            }));
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }
}
