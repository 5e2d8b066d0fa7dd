//! Reference table layout
//!
//! The service never runs DDL itself. Operators create the table once,
//! e.g. with `tabletap schema | psql`.

/// Reference DDL for the records table.
///
/// `value` is JSONB so strings, numbers and booleans come back with their own
/// JSON type. `time` is a native timestamp, rendered as ISO-8601
/// text on read.
pub const CREATE_RECORDS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS records (
    name   TEXT      NOT NULL,
    value  JSONB     NOT NULL,
    "time" TIMESTAMP NOT NULL
);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_names_all_columns() {
        assert!(CREATE_RECORDS_TABLE.contains("EXISTS records ("));
        for column in ["name", "value", "\"time\""] {
            assert!(CREATE_RECORDS_TABLE.contains(column), "missing {column}");
        }
    }
}
