//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for solochat
#[derive(Parser, Debug)]
#[command(name = "solochat")]
#[command(author, version, about = "Multi-session terminal chat with Gemini and Gemma models")]
#[command(long_about = r#"
SoloChat keeps several independent conversations with a hosted Google model
and streams each reply as it is generated.

The API key is read from the environment variable named by
`providers.gemini.api_key_env` (default GOOGLE_API_KEY), or from
`providers.gemini.api_key` in a config file.

Configuration files are loaded from (in priority order):
1. SOLOCHAT_* environment variables (e.g. SOLOCHAT_MODEL__NAME)
2. --config <path>     Explicit config file
3. ./solochat.toml     Project-level config
4. ~/.config/solochat/config.toml   Global config

Example:
  solochat
  solochat -m gemini-2.5-flash
  solochat --conversation-log ~/chats.jsonl
"#)]
pub struct Cli {
    /// Model to chat with (overrides `model.name`)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append a JSONL transcript of the conversation to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
