//! Database layer - connector and repositories
//!
//! # Design Principles
//!
//! - One connection per operation, opened through a [`Connector`]
//! - Connections released on every exit path, success or failure
//! - Positional binds only, never string-built SQL
//! - No retries; failures surface to the caller as [`DbError`]

pub mod connector;
pub mod repos;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support;

pub use connector::{check_connection, Connector, PerRequestConnector};
pub use repos::{PgRecordRepo, RecordStore};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store could not be reached or refused the login.
    #[error("unable to connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed after the connection was established.
    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// The statement ran but the store refused the record.
    #[error("record rejected by the database: {reason}")]
    Rejected { reason: String },

    /// A stored row could not be mapped back to a record.
    #[error("unreadable row: {reason}")]
    InvalidRow { reason: String },
}

impl DbError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
