//! Overlap server binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`OVERLAP_CONFIG`, default `overlap-config.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Connect the configured event store
//! 4. Serve the HTTP API until shutdown

use std::sync::Arc;

use anyhow::Context;
use overlap_core::config::LoggingConfig;
use overlap_core::{OverlapConfig, Scheduler, connect_store};
use overlap_server::{AppState, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = OverlapConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!(
        backend = %config.store.backend,
        host = config.server.host,
        port = config.server.port,
        "overlap-server starting"
    );

    let store = connect_store(&config.store)
        .await
        .with_context(|| format!("failed to open {} store", config.store.backend))?;
    let state = Arc::new(AppState::new(Scheduler::new(store)));

    start_server(&config.server, state).await?;
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
