//! HTTP server command
//!
//! Runs the record service with `/store_data`, `/get_data` and `/health`.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tabletap_server::ErrorStatusPolicy;

use crate::config::{resolve_server, DbArgs, FileConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Address to bind to (default: 0.0.0.0:5000)
    #[arg(long, short = 'b', env = "TABLETAP_BIND")]
    pub bind: Option<SocketAddr>,

    /// Status for invalid store requests: "collapsed" (500) or "split" (400)
    #[arg(long, env = "TABLETAP_CLIENT_ERRORS")]
    pub client_errors: Option<ErrorStatusPolicy>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let file = FileConfig::load(args.db.config.as_deref())?;
    let db_config = args.db.resolve(&file)?;
    let server_config = resolve_server(&file, args.bind, args.client_errors);

    tracing::info!("Starting tabletap server on {}", server_config.bind_addr);

    // Blocks until shutdown
    tabletap_server::serve(db_config, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
