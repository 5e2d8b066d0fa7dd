//! API error types with IntoResponse
//!
//! Every failure becomes `{"error": "<message>"}`. The status code depends on
//! the configured [`ErrorStatusPolicy`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ErrorStatusPolicy;
use crate::db::DbError;
use crate::models::ValidationError;

/// What went wrong while handling a request
#[derive(Debug, thiserror::Error)]
pub enum ApiErrorKind {
    /// Request body missing a field or malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Connection or statement failure in the store
    #[error(transparent)]
    Store(#[from] DbError),
}

/// API error bound to the status policy of the running server
#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    policy: ErrorStatusPolicy,
}

impl ApiError {
    pub fn new(kind: impl Into<ApiErrorKind>, policy: ErrorStatusPolicy) -> Self {
        Self {
            kind: kind.into(),
            policy,
        }
    }

    pub fn status(&self) -> StatusCode {
        match (&self.kind, self.policy) {
            (ApiErrorKind::Validation(_), ErrorStatusPolicy::Split) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.kind {
            ApiErrorKind::Validation(e) => tracing::debug!("Rejected store request: {}", e),
            ApiErrorKind::Store(e) => tracing::error!("Store error: {}", e),
        }

        let status = self.status();
        let body = Json(json!({ "error": self.kind.to_string() }));
        (status, body).into_response()
    }
}
