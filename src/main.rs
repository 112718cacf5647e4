//! ai-digest - Open-Source AI Daily Digest generator
//!
//! A CLI tool that collects new and trending AI repositories, recent
//! framework releases and AI news, and writes a dated markdown digest.
//!
//! Exit codes:
//!   0 - Digest written
//!   1 - Runtime error (config, output directory, write failure, etc.)

mod analysis;
mod cli;
mod client;
mod collectors;
mod config;
mod digest;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use client::HttpApi;
use config::{Config, Credentials, CONFIG_FILE};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("ai-digest v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_digest(args).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            error!("Failed to generate digest: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .ai-digest.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to change the output directory, endpoints and query pacing.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` takes precedence over the --verbose/--quiet level.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete digest workflow.
async fn run_digest(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let credentials = Credentials {
        github_token: args.github_token(),
        brave_api_key: args.brave_api_key(),
    };
    if credentials.github_token.is_none() {
        warn!("No GitHub token configured - using unauthenticated rate limits");
    }

    let now = Utc::now();
    let date = args.date.unwrap_or_else(|| now.date_naive());
    let ctx = config.context(credentials, now);
    let api = HttpApi::new(config.api_settings())?;
    let output_dir = PathBuf::from(&config.general.output_dir);

    let path = digest::generate_digest(&api, &ctx, date, &output_dir, args.format).await?;

    println!("\n✅ Digest saved to: {}", path.display());
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
