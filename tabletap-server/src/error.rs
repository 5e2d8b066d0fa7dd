//! Top-level error type for tabletap-server

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;
use crate::http::server::ServerError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Server(#[from] ServerError),
}
