//! HTTP service
//!
//! Wires the extractor and the record store behind an axum router and runs
//! it.

pub mod error;
pub mod handlers;
pub mod pages;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::extractor::{FetchError, Fetcher};
use crate::store::{Database, DbError, RecordSink};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The record store could not be opened or prepared
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// The HTTP client could not be built
    #[error("Fetcher error: {0}")]
    Fetcher(#[from] FetchError),

    /// Binding or serving failed
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Page fetcher shared by all requests
    pub fetcher: Fetcher,
    /// Where extracted articles are stored
    pub sink: Arc<dyn RecordSink>,
    /// Service configuration
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Build the state from a configuration and a record sink
    pub fn new(config: ServiceConfig, sink: Arc<dyn RecordSink>) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(&config.fetch)?,
            sink,
            config: Arc::new(config),
        })
    }
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/submit", post(pages::submit_login))
        .route("/api/v1/health", get(handlers::health_check))
        .route("/api/v1/processLink", post(handlers::process_link))
        .route(
            "/api/collections/:collection/records/:id",
            get(handlers::view_record),
        )
        .fallback(get(pages::static_file))
        .with_state(state)
}

/// Open the record store, make sure the article collection exists and serve
/// until Ctrl-C
pub async fn start_server(config: ServiceConfig) -> Result<(), ServerError> {
    info!("Bind address: {}", config.bind_address);
    info!("Database: {}", config.database_path.display());
    info!("Article collection: {}", config.collection);

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let database = Database::new_from_path(&config.database_path.to_string_lossy()).await?;
    database.ensure_collection(&config.collection).await?;

    let bind_address = config.bind_address.clone();
    let state = AppState::new(config, Arc::new(database))?;
    let app = create_router(state);

    let listener = TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
