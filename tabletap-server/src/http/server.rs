//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C
//!
//! No timeout or concurrency limit is layered on; a hung store call holds
//! only its own request.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::error::{ApiError, ApiErrorKind};
use super::routes;
use crate::config::{ErrorStatusPolicy, ServerConfig};
use crate::db::RecordStore;

/// Shared application state
///
/// Holds no records, only the handle used to reach the store and the
/// error status policy fixed at startup.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub error_status: ErrorStatusPolicy,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordStore>, error_status: ErrorStatusPolicy) -> Self {
        Self {
            records,
            error_status,
        }
    }

    /// Wrap a failure with this server's status policy.
    pub fn reject(&self, kind: impl Into<ApiErrorKind>) -> ApiError {
        ApiError::new(kind, self.error_status)
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::records::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let repo = PgRecordRepo::new(PerRequestConnector::new(Arc::new(db_config)));
/// run_server(Arc::new(repo), ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    records: Arc<dyn RecordStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let state = AppState::new(records, config.error_status);
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr.to_string(),
            source,
        })?;
    tracing::info!(
        error_status = ?config.error_status,
        "Server listening on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
