//! Record endpoints
//!
//! - `POST /store_data` → append one record
//! - `GET /get_data` → every record in store order

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::ValidRecord;
use crate::http::server::AppState;
use crate::models::Record;

pub const STORED_MESSAGE: &str = "Data stored successfully";

/// Store confirmation
#[derive(Serialize)]
pub struct StoreResponse {
    pub message: &'static str,
}

/// POST /store_data - insert one record
async fn store_data(
    State(state): State<Arc<AppState>>,
    ValidRecord(record): ValidRecord,
) -> Result<Json<StoreResponse>, ApiError> {
    state
        .records
        .append(&record)
        .await
        .map_err(|e| state.reject(e))?;

    tracing::info!(name = %record.name, "Record stored");
    Ok(Json(StoreResponse {
        message: STORED_MESSAGE,
    }))
}

/// GET /get_data - list all records
async fn get_data(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.records.list_all().await.map_err(|e| state.reject(e))?;
    Ok(Json(records))
}

/// Record routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/store_data", post(store_data))
        .route("/get_data", get(get_data))
}
