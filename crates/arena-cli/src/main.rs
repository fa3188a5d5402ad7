//! Arena CLI: entry point.
//!
//! # Commands
//!
//! - `arena serve [--host H] [--port P]`: run the HTTP gateway
//! - `arena compare -p PROMPT -m ID...`: one comparison, printed as cards
//! - `arena models`: list the catalog
//! - `arena init`: write a default config
//! - `arena status`: show configuration and provider status

mod compare_cmd;
mod helpers;
mod init;
mod models;
mod serve;
mod status;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use arena_compare::Comparator;
use arena_core::config::{load_config, Config};
use arena_providers::ModelRegistry;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ⚖️ Arena: send one prompt to many models and compare the answers
#[derive(Parser)]
#[command(name = "arena", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.arena/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Bind address (overrides gateway.host)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides gateway.port)
        #[arg(long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Run a single comparison and print the results
    Compare {
        /// Prompt sent to every model
        #[arg(short, long)]
        prompt: String,

        /// Model id (repeat for each model)
        #[arg(short = 'm', long = "model", required = true)]
        models: Vec<String>,

        /// Print the raw JSON response instead of cards
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// List comparable models
    Models,

    /// Write a default configuration file
    Init,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().map(helpers::expand_tilde);

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(if logs { LogLevel::Debug } else { LogLevel::Info });
            serve::run(config_path, host, port).await
        }
        Commands::Compare {
            prompt,
            models,
            json,
            logs,
        } => {
            init_logging(if logs { LogLevel::Debug } else { LogLevel::Quiet });
            compare_cmd::run(config_path, prompt, models, json).await
        }
        Commands::Models => models::run(config_path),
        Commands::Init => init::run(config_path),
        Commands::Status => status::run(config_path),
    }
}

// ─────────────────────────────────────────────
// Shared setup
// ─────────────────────────────────────────────

/// Load config from `path` (or the default location) plus env overrides.
pub fn load(path: Option<&PathBuf>) -> Config {
    load_config(path.map(PathBuf::as_path))
}

/// Build the comparator every command shares.
pub fn build_comparator(config: &Config) -> Result<Arc<Comparator>> {
    let registry = ModelRegistry::from_config(config).context("failed to build model registry")?;
    Ok(Arc::new(Comparator::new(Arc::new(registry))))
}

#[derive(Clone, Copy)]
enum LogLevel {
    Quiet,
    Info,
    Debug,
}

/// Initialize tracing/logging. `RUST_LOG` wins when set.
fn init_logging(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let default = match level {
        LogLevel::Quiet => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "arena=debug,info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
