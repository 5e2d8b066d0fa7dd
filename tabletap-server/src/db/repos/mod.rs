//! Repository implementations for database access
//!
//! Each repository operation:
//! - Acquires its own connection and releases it before returning
//! - Runs exactly one statement
//! - Commits writes before release

pub mod records;

pub use records::{PgRecordRepo, RecordStore};
