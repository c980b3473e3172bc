//! SearXNG Pool Proxy
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 SEARCH PROXY                  │
//!     Client Request     │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!     ───────────────────┼─▶│  http  │──▶│  search  │──▶│  dispatch  │  │
//!                        │  │ server │   │  params  │   │  rotation  │  │
//!                        │  └────────┘   └──────────┘   └─────┬──────┘  │
//!                        │                                    │         │
//!                        │                                    ▼         │
//!     Client Response    │  ┌────────┐                  ┌────────────┐  │
//!     ◀──────────────────┼──│response│◀─────────────────│  upstream  │◀─┼──── SearXNG
//!                        │  │ + CORS │                  │  client    │  │     pool
//!                        │  └────────┘                  └────────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use searx_proxy::config::{self, ProxyConfig};
use searx_proxy::config::validation::warn_suspicious_upstreams;
use searx_proxy::lifecycle::{signals, Shutdown};
use searx_proxy::observability::{self, metrics};
use searx_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "searx-proxy")]
#[command(about = "Round-robin failover proxy for a pool of SearXNG instances", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding config and BIND_ADDRESS.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config: ProxyConfig = config::load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    observability::init_logging(config.observability.log_format)?;

    tracing::info!("searx-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        allowed_origin = %config.cors.allowed_origin,
        attempt_timeout_ms = config.upstreams.attempt_timeout_ms,
        max_attempts = config.upstreams.max_attempts,
        "Configuration loaded"
    );
    warn_suspicious_upstreams(&config);

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
