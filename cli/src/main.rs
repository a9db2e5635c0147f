//! CLI entrypoint for SoloChat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow};
use clap::Parser;
use solochat_application::{ChatConfig, ChatController, ConversationLogger, Credential};
use solochat_domain::{Model, Severity};
use solochat_infrastructure::{
    ConfigLoader, FileConfig, GeminiGatewayFactory, JsonlConversationLogger,
};
use solochat_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    for issue in config.validate() {
        let line = match issue.severity {
            Severity::Error => ConsoleFormatter::error(&issue.message),
            Severity::Warning => ConsoleFormatter::warning(&issue.message),
        };
        eprintln!("{}", line);
    }

    let model = match &cli.model {
        Some(name) => Model::parse_name(name)?,
        None => config.model.parse().0,
    };
    info!(model = %model, "Starting SoloChat");

    // === Dependency Injection ===
    let gemini = &config.providers.gemini;
    let credential = gemini.resolve_api_key().and_then(Credential::new);
    let factory = Arc::new(GeminiGatewayFactory::from_config(gemini));

    let mut controller = ChatController::new(ChatConfig::new(model), credential, factory);
    if let Some(logger) = conversation_logger(&cli.conversation_log, &config) {
        controller = controller.with_conversation_logger(logger);
    }

    if !controller.has_credential() {
        println!(
            "{}",
            ConsoleFormatter::warning(&format!(
                "API key not found. Set {} in the environment to chat.",
                gemini.api_key_env
            ))
        );
    }

    let repl_config = ReplConfig {
        history_file: config.repl.history_path(),
        show_spinner: config.repl.show_spinner,
    };

    ChatRepl::new(controller, repl_config).run().await?;
    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// With `--log-file`, logs go to that file so they never interleave with
/// the streamed reply.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Open the JSONL transcript if one was requested; the flag wins over config.
fn conversation_logger(
    flag: &Option<PathBuf>,
    config: &FileConfig,
) -> Option<Arc<dyn ConversationLogger>> {
    let path = flag
        .clone()
        .or_else(|| config.logging.conversation_log.as_ref().map(PathBuf::from))?;

    match JsonlConversationLogger::open(&path) {
        Ok(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Some(Arc::new(logger))
        }
        Err(e) => {
            warn!("Could not open conversation log {}: {}", path.display(), e);
            eprintln!(
                "{}",
                ConsoleFormatter::warning(&format!(
                    "Conversation log disabled ({}: {})",
                    path.display(),
                    e
                ))
            );
            None
        }
    }
}
