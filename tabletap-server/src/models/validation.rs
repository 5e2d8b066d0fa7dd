//! Validation error types

use std::fmt;

/// Validation error for store requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not parseable JSON (or has the wrong content type)
    MalformedBody { reason: String },

    /// Body parsed but is not a JSON object
    NotAnObject,

    /// One or more required keys are absent
    MissingFields { fields: Vec<&'static str> },

    /// Key present with an unsupported JSON type
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody { reason } => write!(f, "malformed JSON body: {}", reason),
            Self::NotAnObject => write!(f, "request body must be a JSON object"),
            Self::MissingFields { fields } => {
                let quoted: Vec<String> = fields.iter().map(|k| format!("'{}'", k)).collect();
                write!(f, "missing required field(s): {}", quoted.join(", "))
            }
            Self::WrongType { field, expected } => {
                write!(f, "field '{}' must be {}", field, expected)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
