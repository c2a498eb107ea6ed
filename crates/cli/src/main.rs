//! IKMS CLI
//!
//! Terminal client for the IKMS multi-agent RAG backend: index PDFs, ask
//! questions and inspect how the context critic filtered the retrieved chunks.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, HealthCommand, IndexCommand, ShellCommand};
use ikms_core::{config::AppConfig, logging, AppResult};
use std::path::{Path, PathBuf};

/// IKMS CLI - ask questions over your indexed PDFs
#[derive(Parser, Debug)]
#[command(name = "ikms")]
#[command(about = "Client for the IKMS multi-agent RAG system", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "IKMS_API_BASE_URL")]
    api_url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true, env = "IKMS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question about the indexed documents
    Ask(AskCommand),

    /// Upload a PDF for indexing
    Index(IndexCommand),

    /// Check that the backend is reachable
    Health(HealthCommand),

    /// Interactive session on the single page
    Shell(ShellCommand),
}

/// Load configuration, letting an explicit `--config` path win over the environment.
fn load_config(config_file: Option<&Path>) -> AppResult<AppConfig> {
    let Some(path) = config_file else {
        return AppConfig::load();
    };

    let cwd = std::env::current_dir()?;
    let path = path.to_string_lossy().into_owned();
    AppConfig::load_with(&cwd, |key| {
        if key == "IKMS_CONFIG" {
            Some(path.clone())
        } else {
            std::env::var(key).ok()
        }
    })
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    // Apply CLI overrides
    let config = config.with_overrides(cli.api_url, cli.log_level, cli.verbose, cli.no_color);

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    tracing::info!("IKMS CLI starting");
    tracing::debug!("Backend: {}", config.api_base_url);
    tracing::debug!("Config file: {:?}", config.config_file);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Index(_) => "index",
        Commands::Health(_) => "health",
        Commands::Shell(_) => "shell",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Index(cmd) => cmd.execute(&config).await,
        Commands::Health(cmd) => cmd.execute(&config).await,
        Commands::Shell(cmd) => cmd.execute(&config).await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
