//! Record repository
//!
//! Append one record, list all records. Nothing is cached between calls;
//! the table is the only source of truth.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{Connection, PgConnection, Row};

use crate::db::connector::Connector;
use crate::db::DbError;
use crate::models::{Record, RecordValue};

/// Inserts nothing when the timestamp is `infinity` / `-infinity`.
const INSERT_RECORD: &str = r#"
    INSERT INTO records (name, value, "time")
    SELECT $1, $2, input.t
    FROM (SELECT $3::timestamp AS t) AS input
    WHERE isfinite(input.t)
"#;

/// `time_text` lets non-finite timestamps be read without a native decode.
const SELECT_RECORDS: &str = r#"SELECT name, value, "time", "time"::text AS time_text FROM records"#;

/// Storage operations the endpoint layer depends on.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one record and commit it.
    async fn append(&self, record: &Record) -> Result<(), DbError>;

    /// Read the whole table in store order. No filtering, no paging.
    async fn list_all(&self) -> Result<Vec<Record>, DbError>;
}

/// Postgres-backed record repository
pub struct PgRecordRepo<C> {
    connector: C,
}

impl<C: Connector> PgRecordRepo<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl<C: Connector> RecordStore for PgRecordRepo<C> {
    async fn append(&self, record: &Record) -> Result<(), DbError> {
        let mut conn = self.connector.acquire().await?;
        let result = insert(&mut conn, record).await;
        self.connector.release(conn).await;
        result
    }

    async fn list_all(&self) -> Result<Vec<Record>, DbError> {
        let mut conn = self.connector.acquire().await?;
        let result = select_all(&mut conn).await;
        self.connector.release(conn).await;

        if let Ok(records) = &result {
            tracing::debug!(count = records.len(), "Listed records");
        }
        result
    }
}

async fn insert(conn: &mut PgConnection, record: &Record) -> Result<(), DbError> {
    let mut tx = conn.begin().await?;

    let result = sqlx::query(INSERT_RECORD)
        .bind(&record.name)
        .bind(Json(record.value.to_json()))
        .bind(&record.time)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() != 1 {
        tx.rollback().await?;
        return Err(DbError::Rejected {
            reason: format!("time '{}' is not a finite timestamp", record.time),
        });
    }

    tx.commit().await?;
    Ok(())
}

async fn select_all(conn: &mut PgConnection) -> Result<Vec<Record>, DbError> {
    let rows = sqlx::query(SELECT_RECORDS).fetch_all(&mut *conn).await?;
    rows.iter().map(record_from_row).collect()
}

fn record_from_row(row: &PgRow) -> Result<Record, DbError> {
    Ok(Record {
        name: row.try_get("name")?,
        value: value_from_row(row)?,
        time: time_from_row(row)?,
    })
}

/// Decode `value` from whatever column type the deployment chose.
///
/// JSON columns keep their JSON type; plain SQL columns map to the
/// matching scalar.
fn value_from_row(row: &PgRow) -> Result<RecordValue, DbError> {
    if let Ok(Json(json)) = row.try_get::<Json<Value>, _>("value") {
        return RecordValue::from_json(&json).ok_or_else(|| DbError::InvalidRow {
            reason: format!("value is not a scalar: {}", json),
        });
    }
    if let Ok(text) = row.try_get::<String, _>("value") {
        return Ok(RecordValue::Text(text));
    }
    if let Ok(n) = row.try_get::<f64, _>("value") {
        return Ok(RecordValue::from(n));
    }
    if let Ok(n) = row.try_get::<i64, _>("value") {
        return Ok(RecordValue::from(n));
    }
    if let Ok(n) = row.try_get::<i32, _>("value") {
        return Ok(RecordValue::from(n));
    }
    let b: bool = row.try_get("value")?;
    Ok(RecordValue::Bool(b))
}

/// Render `time` as text, accepting timestamp, timestamptz or text columns.
///
/// `infinity` rows (written out-of-band) overflow chrono, so they are
/// returned as the store's own text and never decoded natively.
fn time_from_row(row: &PgRow) -> Result<String, DbError> {
    let text: String = row.try_get("time_text")?;
    if is_non_finite(&text) {
        return Ok(text);
    }
    if let Ok(ts) = row.try_get::<NaiveDateTime, _>("time") {
        return Ok(render_naive(&ts));
    }
    if let Ok(ts) = row.try_get::<DateTime<Utc>, _>("time") {
        return Ok(render_utc(&ts));
    }
    Ok(text)
}

fn is_non_finite(text: &str) -> bool {
    matches!(text, "infinity" | "-infinity")
}

/// `2024-01-01T00:00:00`, with only the fractional digits that are non-zero
/// (`.25`, not `.250`). Postgres keeps microseconds, so six digits is exact.
fn render_naive(ts: &NaiveDateTime) -> String {
    let full = ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
    full.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn render_utc(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
