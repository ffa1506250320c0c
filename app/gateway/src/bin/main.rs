//! Carehub binary entry point.
//!
//! Loads TOML configuration, builds the response generator, and runs the
//! gateway with graceful shutdown on ctrl-c.

use anyhow::Result;
use carehub_gateway::{GatewayConfig, config::CONFIG_FILE, serve_with_config};
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "carehub", about = "Healthcare dashboard, forum and assistant")]
struct Cli {
    /// Configuration file.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Address to listen on, overriding the configured host and port.
    #[arg(long)]
    bind: Option<String>,

    /// Write the default configuration to `--config` and exit.
    #[arg(long)]
    write_default: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing from RUST_LOG (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.write_default {
        GatewayConfig::write_default(&cli.config)?;
        tracing::info!("wrote default configuration to {}", cli.config.display());
        return Ok(());
    }

    let config = GatewayConfig::load_or_default(&cli.config)?;

    let bind = cli.bind.unwrap_or_else(|| config.bind_address());
    let handle = serve_with_config(&config, &bind).await?;

    shutdown_signal().await;
    handle.shutdown().await?;
    tracing::info!("gateway shut down");
    Ok(())
}

/// Wait for ctrl-c signal for graceful shutdown.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
}
