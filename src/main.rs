//! Task Service
//!
//! HTTP CRUD service for task records, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ ┌──────────────┐   ┌──────────────┐   ┌───────────────┐
//!                     │ http server  │──▶│   routing    │──▶│ task handlers │
//!                     │ (axum, mw)   │   │ method+path  │   │               │
//!     Client Response └──────────────┘   └──────────────┘   └───────┬───────┘
//!     ◀──────────────────────────────────────────────────────────── │
//!                                                                   ▼
//!                                                          ┌─────────────────┐
//!                                                          │  record store   │
//!                                                          │ (db.json mirror)│
//!                                                          └─────────────────┘
//! ```
//!
//! # Routes
//! - `GET /tasks[?search=]`, `POST /tasks`
//! - `GET|PUT|DELETE /tasks/:id`
//! - `PATCH /tasks/:id/complete`

use clap::Parser;
use std::path::PathBuf;

use task_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use task_service::lifecycle::startup;
use task_service::observability::logging;

#[derive(Parser)]
#[command(name = "task-service")]
#[command(about = "HTTP CRUD service for task records", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override storage.path
    #[arg(long)]
    db: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(db) = self.db {
            config.storage.path = db;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("task-service v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        storage_path = %config.storage.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
