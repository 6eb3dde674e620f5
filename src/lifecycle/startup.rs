//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter
//! - Select the persistence gateway once
//! - Bind the listener and serve until a termination signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Missing persistence credentials degrade to log-only mode instead of failing

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::signals::wait_for_termination;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::persistence::{NullGateway, PersistenceError, RestGateway};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Build the server for `config`, choosing the durable gateway when configured.
pub fn build_server(config: ServiceConfig) -> Result<HttpServer, StartupError> {
    match RestGateway::from_config(&config.persistence)? {
        Some(gateway) => {
            tracing::info!(endpoint = %gateway.endpoint(), "Persistence backend configured");
            Ok(HttpServer::new(config, gateway))
        }
        None => {
            tracing::warn!(
                "Persistence backend not configured; submissions will only be logged"
            );
            Ok(HttpServer::new(config, NullGateway))
        }
    }
}

/// Run the service until SIGINT/SIGTERM.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(StartupError::Bind)?;
    let server = build_server(config)?;

    let shutdown = Shutdown::new();
    let watcher = shutdown.clone();
    tokio::spawn(async move {
        wait_for_termination().await;
        watcher.trigger();
    });

    server.run(listener, shutdown.signalled()).await.map_err(StartupError::Serve)
}
