//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses (`{"error": ...}`)

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::{ApiError, ApiErrorKind};
pub use server::{build_router, run_server, AppState};
