//! Fake Cloud Controller server
//!
//! Runs the in-memory fake as a standalone process, for manual poking with
//! `curl` or for clients written in other languages.

use anyhow::Result;
use ccapi_fake::config::ServerConfig;
use ccapi_fake::{create_router, FakeState};
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

/// Fake Cloud Controller v2 API
#[derive(Parser, Debug)]
#[command(name = "ccapi-fake")]
#[command(version, about = "In-memory fake Cloud Controller v2 API", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    // CLI flag > env var > defaults
    let mut config = match ServerConfig::resolve_path(args.config) {
        Some(path) => {
            info!("Configuration file: {}", path.display());
            ServerConfig::load(&path)?
        }
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let app = create_router(FakeState::new());

    let bind_addr = config.address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Fake Cloud Controller listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully..."),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
