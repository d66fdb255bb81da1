//! Siren Asset Proxy
//!
//! An HTTP intermediary for the Monster Siren content provider, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌────────────────────────────────────────────┐
//!                          │                 ASSET PROXY                │
//!                          │                                            │
//!  Client Request          │  ┌────────┐   ┌──────────┐   ┌─────────┐  │
//!  ────────────────────────┼─▶│  http  │──▶│ upstream │──▶│  relay  │  │
//!  (Range: bytes=a-b)      │  │ server │   │  probe   │   │negotiate│  │
//!                          │  └────────┘   └──────────┘   └────┬────┘  │
//!                          │                                   │       │
//!  Client Response         │  ┌──────────────┐            ┌────▼────┐  │
//!  ◀───────────────────────┼──│ chunked body │◀───────────│  relay  │◀─┼── Upstream
//!  (200 / 206 + stream)    │  │   producer   │            │ stream  │  │    CDN
//!                          │  └──────────────┘            └─────────┘  │
//!                          │                                            │
//!                          │  ┌──────────────────────────────────────┐  │
//!                          │  │         Cross-Cutting Concerns       │  │
//!                          │  │   config   errors   observability    │  │
//!                          │  └──────────────────────────────────────┘  │
//!                          └────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use siren_proxy::config::{load_config, ProxyConfig};
use siren_proxy::http::HttpServer;

#[derive(Parser)]
#[command(name = "siren-proxy")]
#[command(about = "Streaming byte-range proxy for the Monster Siren API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siren_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("siren-proxy v0.1.0 starting");

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => load_config(&path)?,
        None => ProxyConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_base = %config.upstream.api_base,
        accept_invalid_certs = config.upstream.accept_invalid_certs,
        probe_timeout_secs = config.timeouts.probe_secs,
        stream_read_secs = config.timeouts.stream_read_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            siren_proxy::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
