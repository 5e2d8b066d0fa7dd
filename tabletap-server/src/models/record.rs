//! The single persisted entity
//!
//! A record is immutable once stored: the service has no update or delete
//! path, so nothing here exposes mutation beyond construction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ValidationError;

/// Required keys of a store request, in reporting order.
const REQUIRED_FIELDS: [&str; 3] = ["name", "value", "time"];

/// `infinity` / `-infinity`: valid to Postgres, but not a point in time.
static NON_FINITE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*[+-]?infinity\s*$").expect("invalid non-finite regex"));

/// A clock time followed by a zone designator (`Z`, `UTC`, `+05:00`, `-0800`,
/// `Europe/Paris`). The time column has no zone, so the offset would be dropped.
static ZONED_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?\s*(z|utc|gmt|[+-]\d{1,2}(:?\d{2})?|[a-z_]+/[a-z_]+)\s*$")
        .expect("invalid zoned time regex")
});

/// Opaque scalar carried in the `value` field.
///
/// Integers stay integers and floats stay floats on the way through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl RecordValue {
    /// Accept any JSON scalar except null.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for RecordValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<f64> for RecordValue {
    /// Non-finite floats have no JSON form and become text.
    fn from(n: f64) -> Self {
        match serde_json::Number::from_f64(n) {
            Some(num) => Self::Number(num),
            None => Self::Text(n.to_string()),
        }
    }
}

impl From<i64> for RecordValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for RecordValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for RecordValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One row of the records table, as seen by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub value: RecordValue,
    /// Timestamp-like text; the store parses it on insert and renders it on read.
    pub time: String,
}

impl Record {
    pub fn new(name: impl Into<String>, value: impl Into<RecordValue>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            time: time.into(),
        }
    }

    /// Build a record from a decoded request body.
    ///
    /// # Rules
    /// - Body must be a JSON object
    /// - `name`, `value` and `time` must all be present (all absent keys are reported)
    /// - `name` and `time` are strings, `value` is a non-null scalar
    /// - `time` must be finite and carry no UTC offset or zone name
    /// - Unknown keys are ignored
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let object = body.as_object().ok_or(ValidationError::NotAnObject)?;

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| !object.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing });
        }

        let name = string_field(object, "name")?;
        let value = RecordValue::from_json(&object["value"]).ok_or(ValidationError::WrongType {
            field: "value",
            expected: "a string, number, or boolean",
        })?;
        let time = string_field(object, "time")?;
        check_time(&time)?;

        Ok(Self { name, value, time })
    }
}

/// Reject time text the store would accept but could not give back unchanged.
fn check_time(time: &str) -> Result<(), ValidationError> {
    if NON_FINITE_RE.is_match(time) {
        return Err(ValidationError::WrongType {
            field: "time",
            expected: "a finite timestamp",
        });
    }
    if ZONED_TIME_RE.is_match(time) {
        return Err(ValidationError::WrongType {
            field: "time",
            expected: "a timestamp without a UTC offset or time zone",
        });
    }
    Ok(())
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    object[field]
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::WrongType {
            field,
            expected: "a string",
        })
}
