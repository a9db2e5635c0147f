//! Model configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};
use solochat_domain::{ConfigIssue, Model, Severity};

/// Raw model configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier sent to the provider
    pub name: String,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: Model::default().to_string(),
        }
    }
}

impl FileModelConfig {
    /// Parse the configured model, falling back to the default on error.
    pub fn parse(&self) -> (Model, Vec<ConfigIssue>) {
        match Model::parse_name(&self.name) {
            Ok(model) => (model, Vec::new()),
            Err(_) => (
                Model::default(),
                vec![ConfigIssue::empty_value(Severity::Warning, "model.name")],
            ),
        }
    }
}
