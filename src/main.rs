//! Deals proxy.
//!
//! Local API surface for Pipedrive deals, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                   DEALS PROXY                     │
//!   Client Request     │  ┌──────────┐  ┌─────────┐  ┌────────────────┐   │
//!   ───────────────────┼─▶│request id│─▶│ logging │─▶│    metrics     │   │
//!                      │  └──────────┘  └─────────┘  └───────┬────────┘   │
//!                      │                                      ▼            │
//!                      │                              ┌────────────────┐   │
//!                      │                              │  translators   │   │
//!                      │                              │ list/create/put│   │
//!                      │                              └───────┬────────┘   │
//!   Client Response    │  ┌──────────────────┐        ┌───────▼────────┐   │
//!   ◀──────────────────┼──│ relay (force JSON)│◀───────│   forwarder    │◀──┼── Pipedrive API
//!                      │  └──────────────────┘        └────────────────┘   │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use deals_proxy::config::{ensure_valid, load_config};
use deals_proxy::lifecycle::{signals, startup, StartupError};
use deals_proxy::observability::{self, install_exporter};
use deals_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "deals-proxy")]
#[command(about = "Proxy for Pipedrive deal endpoints", long_about = None)]
struct Cli {
    /// TOML config file. PIPEDRIVE_* environment variables override it.
    #[arg(short, long, env = "DEALS_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    let config = ensure_valid(config)?;

    observability::init_tracing(&config.observability);
    tracing::info!("deals-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.resolved_base_url(),
        timeout_secs = config.upstream.timeout_secs,
        body_embedded_update = config.compat.body_embedded_update,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let exporter = if config.observability.metrics_enabled {
        let handle = install_exporter()?;
        tokio::spawn(observability::metrics::run_upkeep(handle.clone(), Duration::from_secs(5)));
        Some(handle)
    } else {
        None
    };

    let listener = startup::bind(&config.listener).await?;
    let server = HttpServer::new(config, exporter)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::forward_signals(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
