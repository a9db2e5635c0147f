//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use solochat_domain::{ConfigIssue, Severity};

/// Default Generative Language API endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Provider configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Google Generative Language settings
    pub gemini: FileGeminiConfig,
}

/// Gemini provider configuration
///
/// ```toml
/// [providers.gemini]
/// api_key_env = "GOOGLE_API_KEY"
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// connect_timeout_secs = 10
/// read_timeout_secs = 120
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key (takes precedence over `api_key_env`)
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// TCP connect timeout
    pub connect_timeout_secs: u64,
    /// Longest wait for the next piece of a response; a reply that keeps
    /// streaming is never cut off
    pub read_timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            read_timeout_secs: 120,
        }
    }
}

impl FileGeminiConfig {
    /// Resolve the API key: inline value first, then the named env var.
    ///
    /// Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        if let Some(key) = self.api_key.clone().and_then(non_blank) {
            return Some(key);
        }
        let env_name = self.api_key_env.trim();
        if env_name.is_empty() {
            return None;
        }
        lookup(env_name).and_then(non_blank)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.api_key_env.trim().is_empty() && self.api_key.is_none() {
            issues.push(ConfigIssue::empty_value(
                Severity::Warning,
                "providers.gemini.api_key_env",
            ));
        }
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            issues.push(ConfigIssue::empty_value(
                Severity::Error,
                "providers.gemini.base_url",
            ));
        } else if let Err(e) = reqwest::Url::parse(base_url) {
            issues.push(ConfigIssue::invalid_value(
                Severity::Error,
                "providers.gemini.base_url",
                &format!("not a valid URL ({})", e),
            ));
        }
        for (field, value) in [
            (
                "providers.gemini.connect_timeout_secs",
                self.connect_timeout_secs,
            ),
            (
                "providers.gemini.read_timeout_secs",
                self.read_timeout_secs,
            ),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::out_of_range(
                    Severity::Warning,
                    field,
                    value,
                    "must be at least 1",
                ));
            }
        }
        issues
    }
}
