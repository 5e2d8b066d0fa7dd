//! Shared fixtures for database tests

use crate::config::{DbConfig, PartialDbConfig};

/// Nothing listens on port 1, so the connect is refused immediately.
pub(crate) fn unreachable_config() -> DbConfig {
    DbConfig {
        dbname: "tabletap".into(),
        user: "tabletap".into(),
        password: "tabletap".into(),
        host: "127.0.0.1".into(),
        port: 1,
    }
}

/// Settings for a real database, read from the `TABLETAP_DB_*` variables.
pub(crate) fn env_config() -> DbConfig {
    let var = |key: &str| std::env::var(key).ok();
    PartialDbConfig {
        dbname: var("TABLETAP_DB_NAME"),
        user: var("TABLETAP_DB_USER"),
        password: var("TABLETAP_DB_PASSWORD"),
        host: var("TABLETAP_DB_HOST"),
        port: var("TABLETAP_DB_PORT").and_then(|p| p.parse().ok()),
    }
    .build()
    .expect("TABLETAP_DB_* variables required")
}
