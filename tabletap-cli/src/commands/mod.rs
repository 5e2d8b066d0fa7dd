//! Command implementations for the tabletap CLI

pub mod check;
pub mod schema;
pub mod serve;

pub use check::run_check;
pub use schema::run_schema;
pub use serve::run_serve;
