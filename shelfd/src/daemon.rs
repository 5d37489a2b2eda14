//! Daemon: process lifecycle.
//!
//! # Lifecycle
//!
//! 1. Load configuration
//! 2. Ensure the data file exists (created as an empty sequence)
//! 3. Bind and serve the API
//! 4. Graceful shutdown on SIGINT

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use shelf_engine::Catalog;
use shelf_store::{JsonFileStore, RecordStore, RequestLog};

use crate::api::{create_router, ApiState};
use crate::config::Config;
use crate::error::{DaemonError, DaemonResult};

// =============================================================================
// Daemon
// =============================================================================

/// The Shelf daemon.
pub struct Daemon<S: RecordStore + 'static> {
    /// Configuration
    config: Config,
    /// Query & mutation engine
    catalog: Arc<Catalog<S>>,
    /// Request log
    request_log: RequestLog,
}

impl Daemon<JsonFileStore> {
    /// Create a daemon over the configured JSON file.
    pub fn from_config(config: Config) -> Self {
        let store = Arc::new(JsonFileStore::from_config(&config.store));
        let catalog = Arc::new(Catalog::new(store, config.engine.clone()));
        let request_log = RequestLog::from_config(&config.store);

        Self {
            config,
            catalog,
            request_log,
        }
    }
}

impl<S: RecordStore + 'static> Daemon<S> {
    /// Create a daemon with provided components.
    pub fn new(config: Config, catalog: Arc<Catalog<S>>, request_log: RequestLog) -> Self {
        Self {
            config,
            catalog,
            request_log,
        }
    }

    /// The engine this daemon serves
    pub fn catalog(&self) -> &Arc<Catalog<S>> {
        &self.catalog
    }

    /// Build the API router.
    pub fn router(&self) -> Router {
        create_router(Arc::new(ApiState {
            catalog: self.catalog.clone(),
            request_log: self.request_log.clone(),
        }))
    }

    /// Run the daemon.
    ///
    /// This method blocks until shutdown is requested (SIGINT).
    pub async fn run(self) -> DaemonResult<()> {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.config.environment,
            data_file = %self.config.store.data_file.display(),
            request_log = %self.config.store.request_log.display(),
            "Starting Shelf daemon"
        );

        self.catalog.initialize().await?;

        let listener = self.bind().await?;
        let api_addr = local_addr(&listener)?;
        info!(%api_addr, "API server started");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Unexpected(format!("API server error: {}", e)))?;

        info!("Shutdown complete");
        Ok(())
    }

    /// Initialize the store and serve the API on a background task.
    ///
    /// Returns the bound address; used when the caller owns the runtime
    /// lifetime (tests, embedding).
    pub async fn start_api_server(&self) -> DaemonResult<SocketAddr> {
        self.catalog.initialize().await?;

        let listener = self.bind().await?;
        let addr = local_addr(&listener)?;
        let router = self.router();

        // Spawn the server task
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!(error = %e, "API server error");
            }
        });

        Ok(addr)
    }

    async fn bind(&self) -> DaemonResult<TcpListener> {
        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);

        TcpListener::bind(&addr)
            .await
            .map_err(|e| DaemonError::Config(format!("Failed to bind to {}: {}", addr, e)))
    }
}

fn local_addr(listener: &TcpListener) -> DaemonResult<SocketAddr> {
    listener
        .local_addr()
        .map_err(|e| DaemonError::Config(format!("Failed to get local address: {}", e)))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}

// =============================================================================
// Tests
// =============================================================================
