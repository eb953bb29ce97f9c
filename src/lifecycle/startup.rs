//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the record store (fatal if the snapshot is corrupt)
//! - Start the metrics endpoint when enabled
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_signal;
use crate::observability::metrics;
use crate::routing::PatternError;
use crate::store::StoreError;
use crate::tasks::{TaskStore, TASKS_TABLE};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),

    #[error("invalid route table: {0}")]
    Routes(#[from] PatternError),

    #[error("invalid metrics address: {0}")]
    MetricsAddress(#[from] std::net::AddrParseError),

    #[error("failed to start metrics endpoint: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the service until SIGINT/SIGTERM.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let store = TaskStore::open(&config.storage.path)?;

    // The recorder must be installed before the first gauge is set.
    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse::<SocketAddr>()?;
        metrics::init_metrics(addr)?;
    }
    metrics::record_task_count(store.len(TASKS_TABLE));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config, store)?;
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unparseable_metrics_address_aborts_startup() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.storage.path = dir.path().join("db.json").to_string_lossy().into_owned();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let err = run(config).await.unwrap_err();
        assert!(matches!(err, StartupError::MetricsAddress(_)), "{err}");
    }

    #[tokio::test]
    async fn test_corrupt_store_aborts_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut config = ServiceConfig::default();
        config.storage.path = path.to_string_lossy().into_owned();

        let err = run(config).await.unwrap_err();
        assert!(matches!(err, StartupError::Store(StoreError::Corrupt { .. })), "{err}");
    }
}
