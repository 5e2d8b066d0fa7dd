//! Print the reference table layout

use anyhow::Result;
use tabletap_server::db::schema::CREATE_RECORDS_TABLE;

/// Write the records table DDL to stdout
pub fn run_schema() -> Result<()> {
    print!("{}", CREATE_RECORDS_TABLE);
    Ok(())
}
