//! Layered configuration loading
//!
//! Priority order (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables (`TABLETAP_*`), including values from .env files
//! 3. TOML config file (`--config`, default ~/.tabletap/config.toml)
//!
//! Everything is read once at startup.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use tabletap_server::config::{PartialDbConfig, DEFAULT_BIND_ADDR};
use tabletap_server::{DbConfig, ErrorStatusPolicy, ServerConfig};

/// Get the tabletap config directory path (~/.tabletap)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tabletap"))
}

/// Default config file location (~/.tabletap/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Load .env files from the current directory and ~/.tabletap/.env.
///
/// dotenvy never overwrites variables that are already set, so the
/// current directory wins over the home directory and the real
/// environment wins over both. Returns the files that were loaded.
///
/// Must run before argument parsing so clap's `env` lookups see the values.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded.push(env_file);
        }
    }

    loaded
}

/// Contents of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub database: PartialDbConfig,

    #[serde(default)]
    pub server: ServerSection,
}

/// `[server]` table of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub bind: Option<SocketAddr>,

    #[serde(default)]
    pub client_errors: Option<ErrorStatusPolicy>,
}

impl FileConfig {
    /// Parse a config file from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse config file")
    }

    /// Load the config file.
    ///
    /// An explicit path must exist. The default path is optional and an
    /// empty config is used when it is absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file found, using environment and flags only");
                    return Ok(Self::default());
                }
            },
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Database connection flags shared by every command that talks to the store
#[derive(Args, Debug, Clone, Default)]
pub struct DbArgs {
    /// Config file (default: ~/.tabletap/config.toml)
    #[arg(long, short = 'c', env = "TABLETAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database name
    #[arg(long, env = "TABLETAP_DB_NAME")]
    pub db_name: Option<String>,

    /// Database user
    #[arg(long, env = "TABLETAP_DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "TABLETAP_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database host
    #[arg(long, env = "TABLETAP_DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long, env = "TABLETAP_DB_PORT")]
    pub db_port: Option<u16>,
}

impl DbArgs {
    /// Settings given on the command line or through the environment.
    pub fn to_partial(&self) -> PartialDbConfig {
        PartialDbConfig {
            dbname: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
        }
    }

    /// Merge file, environment and flags into a complete [`DbConfig`].
    pub fn resolve(&self, file: &FileConfig) -> Result<DbConfig> {
        file.database
            .clone()
            .merge(self.to_partial())
            .build()
            .context("Incomplete database configuration (set TABLETAP_DB_* or use --db-* flags)")
    }
}

/// Resolve the server settings from the file section and the flag overrides.
pub fn resolve_server(
    file: &FileConfig,
    bind: Option<SocketAddr>,
    client_errors: Option<ErrorStatusPolicy>,
) -> ServerConfig {
    ServerConfig {
        bind_addr: bind
            .or(file.server.bind)
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR)),
        error_status: client_errors
            .or(file.server.client_errors)
            .unwrap_or_default(),
    }
}
