//! Storage Connector - one connection per operation
//!
//! Connections are not pooled or reused. [`Connector`] is the seam where a
//! pooled implementation can be swapped in without touching repositories.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use super::DbError;
use crate::config::DbConfig;

/// Source of live store connections.
///
/// Every successful [`Connector::acquire`] must be paired with a
/// [`Connector::release`]. A connection dropped without release is still
/// closed, just without the graceful goodbye.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn acquire(&self) -> Result<PgConnection, DbError>;

    async fn release(&self, conn: PgConnection);
}

/// Opens a fresh connection on every acquire and closes it on release.
#[derive(Debug, Clone)]
pub struct PerRequestConnector {
    config: Arc<DbConfig>,
}

impl PerRequestConnector {
    pub fn new(config: Arc<DbConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for PerRequestConnector {
    async fn acquire(&self) -> Result<PgConnection, DbError> {
        let options = self.config.connect_options();
        PgConnection::connect_with(&options).await.map_err(|e| {
            tracing::warn!(
                host = %self.config.host,
                port = self.config.port,
                dbname = %self.config.dbname,
                "Unable to connect to the database: {}",
                e
            );
            DbError::Connection(e)
        })
    }

    async fn release(&self, conn: PgConnection) {
        if let Err(e) = conn.close().await {
            tracing::debug!("Connection close failed: {}", e);
        }
    }
}

/// Open one connection, run a trivial query, and release it.
pub async fn check_connection<C: Connector + ?Sized>(connector: &C) -> Result<(), DbError> {
    let mut conn = connector.acquire().await?;
    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&mut conn)
        .await
        .map(|_| ())
        .map_err(DbError::from);
    connector.release(conn).await;
    result
}
