//! End-to-end checks over a real TCP listener

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use tabletap_server::db::{DbError, RecordStore};
use tabletap_server::http::{build_router, AppState};
use tabletap_server::models::Record;
use tabletap_server::ErrorStatusPolicy;

#[derive(Default)]
struct MemoryStore {
    rows: Mutex<Vec<Record>>,
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, record: &Record) -> Result<(), DbError> {
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Record>, DbError> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_app(policy: ErrorStatusPolicy) -> String {
    let app = build_router(AppState::new(Arc::new(MemoryStore::default()), policy));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn store_and_list_over_http() {
    let base = spawn_app(ErrorStatusPolicy::Collapsed).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/store_data"))
        .json(&json!({"name": "temp", "value": 23.5, "time": "2024-01-01T00:00:00"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Data stored successfully"}));

    let response = client.get(format!("{base}/get_data")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let rows: Vec<Record> = response.json().await.unwrap();
    assert_eq!(rows, vec![Record::new("temp", 23.5, "2024-01-01T00:00:00")]);
}

#[tokio::test]
async fn missing_keys_over_http() {
    let base = spawn_app(ErrorStatusPolicy::Collapsed).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/store_data"))
        .json(&json!({"name": "temp"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("'value'"));

    let rows: Vec<Value> = client
        .get(format!("{base}/get_data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn mixed_value_types_survive() {
    let base = spawn_app(ErrorStatusPolicy::Split).await;
    let client = reqwest::Client::new();

    let bodies = [
        json!({"name": "a", "value": 7, "time": "2024-01-01T00:00:00"}),
        json!({"name": "b", "value": "warm", "time": "2024-01-01T00:00:01"}),
        json!({"name": "c", "value": false, "time": "2024-01-01T00:00:02"}),
    ];
    for body in &bodies {
        let response = client
            .post(format!("{base}/store_data"))
            .json(body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let rows: Value = client
        .get(format!("{base}/get_data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rows, Value::Array(bodies.to_vec()));
}
