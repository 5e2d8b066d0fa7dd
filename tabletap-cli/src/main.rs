//! tabletap CLI - record storage service
//!
//! Entry point for the `tabletap` binary:
//! - `serve`: run the HTTP service (`/store_data`, `/get_data`, `/health`)
//! - `check`: verify the database settings by opening one connection
//! - `schema`: print the reference DDL for the records table

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "tabletap",
    author,
    version,
    about = "Minimal HTTP service that stores and lists records in Postgres",
    long_about = "Accepts JSON records on POST /store_data and returns every stored record \
                  on GET /get_data. Each request uses its own database connection."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Open one database connection and report whether it works
    Check(commands::check::CheckArgs),
    /// Print the reference DDL for the records table
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values must be in place before clap reads `env` fallbacks
    let dotenv_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })
        .context("Failed to initialize logging")?;
    for path in &dotenv_files {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Check(args) => commands::run_check(args).await?,
        Commands::Schema => commands::run_schema()?,
    }
    Ok(())
}
