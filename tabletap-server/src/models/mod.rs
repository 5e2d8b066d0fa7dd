//! Domain models with validation at construction
//!
//! Request bodies become [`Record`]s only through [`Record::from_json`], so
//! a record that reaches the repository always has all three fields.

pub mod record;
pub mod validation;

pub use record::{Record, RecordValue};
pub use validation::ValidationError;
