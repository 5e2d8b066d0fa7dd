//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use super::server::AppState;
use crate::models::{Record, ValidationError};

/// Extract and validate a record from a JSON request body.
///
/// Parse failures and missing fields are both rejected with the server's
/// error status policy, never with axum's plain-text rejections.
pub struct ValidRecord(pub Record);

impl FromRequest<Arc<AppState>> for ValidRecord {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                state.reject(ValidationError::MalformedBody {
                    reason: rejection.body_text(),
                })
            })?;

        let record = Record::from_json(&body).map_err(|e| state.reject(e))?;
        Ok(Self(record))
    }
}
