//! Configuration file loading for solochat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SOLOCHAT_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./solochat.toml` or `./.solochat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/solochat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGeminiConfig, FileLoggingConfig, FileModelConfig, FileOutputConfig,
    FileProvidersConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
