//! tabletap-server: record storage over HTTP
//!
//! Two routes sit on top of a single Postgres table:
//! - `POST /store_data` appends one record
//! - `GET /get_data` lists every stored record
//!
//! Each request opens its own store connection through a [`db::Connector`]
//! and releases it before the response is written.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

use std::sync::Arc;

use db::{PerRequestConnector, PgRecordRepo};

pub use config::{DbConfig, ErrorStatusPolicy, ServerConfig};
pub use error::{Error, Result};

/// Wire connector, repository and router, then serve until shutdown.
pub async fn serve(db_config: DbConfig, server_config: ServerConfig) -> Result<()> {
    tracing::info!(
        host = %db_config.host,
        port = db_config.port,
        dbname = %db_config.dbname,
        "Using per-request database connections"
    );

    let connector = PerRequestConnector::new(Arc::new(db_config));
    let repo = PgRecordRepo::new(connector);

    http::run_server(Arc::new(repo), server_config).await?;
    Ok(())
}

/// Open one connection with `db_config`, run `SELECT 1`, and release it.
pub async fn check(db_config: DbConfig) -> Result<()> {
    let connector = PerRequestConnector::new(Arc::new(db_config));
    db::check_connection(&connector).await?;
    Ok(())
}
