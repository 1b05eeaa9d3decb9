//! Fitcheck CLI - AI fashion advisor service.
//!
//! Fitcheck takes outfit photos and returns style feedback plus LLM-generated
//! suggestions. Classification runs locally with CLIP over ONNX Runtime; the
//! advice text comes from OpenRouter chat completions.
//!
//! # Usage
//!
//! ```bash
//! # Download the CLIP model files
//! fitcheck models download
//!
//! # Start the HTTP server
//! fitcheck serve
//!
//! # View configuration
//! fitcheck config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod server;

/// Fitcheck - AI fashion advisor service.
#[derive(Parser, Debug)]
#[command(name = "fitcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(cli::serve::ServeArgs),

    /// Manage model files (download, list, etc.)
    Models(cli::models::ModelsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match fitcheck_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `fitcheck config path`."
            );
            fitcheck_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Fitcheck v{}", fitcheck_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args).await,
        Commands::Models(args) => cli::models::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
