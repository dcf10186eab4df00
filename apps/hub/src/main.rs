mod api_client;
mod cli;
mod config;
mod errors;
mod models;
mod review;
mod routes;
mod shell;
mod state;
mod storage;
mod upload;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first so RUST_LOG from .env applies to logging
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Resume Review Hub v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "Backend base URL {} (public host {})",
        config.api_base_url, config.public_host
    );

    cli::run(cli, config).await
}
