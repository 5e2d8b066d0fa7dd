//! Process configuration, fixed at startup
//!
//! [`DbConfig`] carries the five connection settings the Storage Connector
//! needs. The CLI assembles it from several layers through [`PartialDbConfig`]
//! and hands the finished value to the connector by reference.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

/// Default listen address: all interfaces, port 5000.
pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 5000);

/// Configuration errors raised while assembling settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing database setting(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Connection settings for the relational store.
///
/// All fields are required. There are no production defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl DbConfig {
    /// Connection options for one sqlx connection.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// One layer of database settings (file, environment, or flags).
///
/// Layers are combined with [`PartialDbConfig::merge`]; the final layer is
/// turned into a [`DbConfig`] with [`PartialDbConfig::build`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialDbConfig {
    #[serde(default)]
    pub dbname: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

impl PartialDbConfig {
    /// Overlay `other` on top of `self`. Values set in `other` win.
    pub fn merge(self, other: PartialDbConfig) -> Self {
        Self {
            dbname: other.dbname.or(self.dbname),
            user: other.user.or(self.user),
            password: other.password.or(self.password),
            host: other.host.or(self.host),
            port: other.port.or(self.port),
        }
    }

    /// Finish the configuration, reporting every missing key at once.
    pub fn build(self) -> Result<DbConfig, ConfigError> {
        let mut missing = Vec::new();
        if self.dbname.is_none() {
            missing.push("dbname");
        }
        if self.user.is_none() {
            missing.push("user");
        }
        if self.password.is_none() {
            missing.push("password");
        }
        if self.host.is_none() {
            missing.push("host");
        }
        if self.port.is_none() {
            missing.push("port");
        }

        match self {
            Self {
                dbname: Some(dbname),
                user: Some(user),
                password: Some(password),
                host: Some(host),
                port: Some(port),
            } => Ok(DbConfig {
                dbname,
                user,
                password,
                host,
                port,
            }),
            _ => Err(ConfigError::Missing(missing)),
        }
    }
}

/// How endpoint errors map to HTTP status codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatusPolicy {
    /// Every failure is a 500, including malformed client input.
    #[default]
    Collapsed,
    /// Validation failures are 400; store failures stay 500.
    Split,
}

impl FromStr for ErrorStatusPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "collapsed" => Ok(Self::Collapsed),
            "split" => Ok(Self::Split),
            other => Err(ConfigError::Invalid {
                key: "client_errors",
                reason: format!("expected 'collapsed' or 'split', got '{}'", other),
            }),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Status code policy for error responses
    pub error_status: ErrorStatusPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            error_status: ErrorStatusPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> PartialDbConfig {
        PartialDbConfig {
            dbname: Some("sensors".into()),
            user: Some("writer".into()),
            password: Some("hunter2".into()),
            host: Some("db.internal".into()),
            port: Some(5432),
        }
    }

    #[test]
    fn build_complete_config() {
        let cfg = full().build().unwrap();
        assert_eq!(cfg.dbname, "sensors");
        assert_eq!(cfg.port, 5432);
    }

    #[test]
    fn build_reports_every_missing_key() {
        let partial = PartialDbConfig {
            user: Some("writer".into()),
            ..Default::default()
        };
        let err = partial.build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing database setting(s): dbname, password, host, port"
        );
    }

    #[test]
    fn later_layer_wins() {
        let overlay = PartialDbConfig {
            host: Some("localhost".into()),
            ..Default::default()
        };
        let cfg = full().merge(overlay).build().unwrap();
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.user, "writer");
    }

    #[test]
    fn debug_redacts_password() {
        let cfg = full().build().unwrap();
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn error_policy_parses() {
        assert_eq!("split".parse::<ErrorStatusPolicy>().unwrap(), ErrorStatusPolicy::Split);
        assert_eq!(
            "Collapsed".parse::<ErrorStatusPolicy>().unwrap(),
            ErrorStatusPolicy::Collapsed
        );
        assert!("loose".parse::<ErrorStatusPolicy>().is_err());
    }

    #[test]
    fn default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.error_status, ErrorStatusPolicy::Collapsed);
    }
}
