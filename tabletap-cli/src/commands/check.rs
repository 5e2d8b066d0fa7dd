//! Connectivity check against the configured database

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{DbArgs, FileConfig};

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Open and release one connection, reporting the outcome
pub async fn run_check(args: CheckArgs) -> Result<()> {
    let file = FileConfig::load(args.db.config.as_deref())?;
    let db_config = args.db.resolve(&file)?;
    let target = format!(
        "{}@{}:{}/{}",
        db_config.user, db_config.host, db_config.port, db_config.dbname
    );

    tabletap_server::check(db_config)
        .await
        .with_context(|| format!("Database check failed for {}", target))?;

    println!("ok: connected to {}", target);
    Ok(())
}
