//! Startup orchestration.
//!
//! # Order
//! 1. Load `.env`, then load and validate configuration
//! 2. Initialize logging, then metrics when enabled
//! 3. Connect the database pool (best effort)
//! 4. Compile views
//! 5. Bind the listener and serve until shutdown
//!
//! Any error before serving is fatal, except the database connection: a
//! failed first session leaves the client disconnected and the site still serves.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::util::TryInitError;

use crate::config::{load_config, load_env_file, ConfigError};
use crate::db::MssqlClient;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::Shutdown;
use crate::observability::{logging, metrics};
use crate::views::{ViewError, Views};

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] TryInitError),

    #[error("Invalid metrics address: {0}")]
    MetricsAddress(String),

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("Failed to compile views: {0}")]
    Views(#[from] ViewError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the storefront until a shutdown signal arrives.
pub async fn run(config_path: Option<&Path>) -> Result<(), StartupError> {
    let env_file = load_env_file()?;
    let config = load_config(config_path)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?config_path,
        env_file = ?env_file,
        bind_address = %config.listener.bind_address(),
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.name,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let db = MssqlClient::connect(&config.database).await;
    let views = Views::new()?;
    let state = AppState::new(Arc::new(db), Arc::new(views));

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    HttpServer::new(&config, state)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
