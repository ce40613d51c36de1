//! In-process stand-in for the forecast service.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::client::ForecastClient;
use crate::config::ClientConfig;

/// Path with query string and JSON body of every request the mock received.
pub type Recorded = Arc<Mutex<Vec<(String, Value)>>>;

pub struct MockService {
    pub client: ForecastClient,
    pub requests: Recorded,
}

impl MockService {
    /// The recorded request whose path starts with `prefix`.
    pub fn request(&self, prefix: &str) -> Option<(String, Value)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|(path, _)| path.starts_with(prefix))
            .cloned()
    }
}

fn record(requests: &Recorded, uri: &Uri, body: Value) {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    requests.lock().unwrap().push((path, body));
}

fn rejected(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"ok": false, "message": message}))).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn upload(State(requests): State<Recorded>, uri: Uri, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let text = field.text().await.unwrap_or_default();
        let rows = text.lines().count().saturating_sub(1);
        record(&requests, &uri, json!({"file_name": file_name, "rows": rows}));
        return Json(json!({"ok": true, "rows": rows, "format": "csv"})).into_response();
    }
    rejected(StatusCode::BAD_REQUEST, "No file uploaded")
}

async fn ingest(State(requests): State<Recorded>, uri: Uri, Json(body): Json<Value>) -> Json<Value> {
    let items = body["_items"].as_array().cloned().unwrap_or_default();
    let mut columns: Vec<String> = items
        .first()
        .and_then(Value::as_object)
        .map(|item| item.keys().cloned().collect())
        .unwrap_or_default();
    columns.sort();
    record(&requests, &uri, body);
    Json(json!({"ok": true, "rows": items.len(), "columns": columns, "format": "acn-json"}))
}

async fn raw(State(requests): State<Recorded>, uri: Uri) -> Json<Value> {
    record(&requests, &uri, Value::Null);
    Json(json!({
        "ok": true,
        "total_rows": 2,
        "columns": ["connectionTime", "siteID", "kWhDelivered"],
        "preview": [
            {"connectionTime": "2024-01-01 08:00", "siteID": 1, "kWhDelivered": 7.5},
            {"connectionTime": "2024-01-01 09:30", "siteID": 2, "kWhDelivered": null},
        ],
        "source": "sessions.csv",
    }))
}

async fn clean(State(requests): State<Recorded>, uri: Uri) -> Json<Value> {
    record(&requests, &uri, Value::Null);
    Json(json!({
        "ok": true,
        "message": "Aggregated 2 sessions into 1 hourly buckets",
        "null_counts": {"site": 0, "energy_kwh": 3},
        "preview": [{"energy_kwh": 7.5, "ts": "2024-01-01 08:00", "sessions": 1}],
    }))
}

async fn series(State(requests): State<Recorded>, uri: Uri) -> Json<Value> {
    record(&requests, &uri, Value::Null);
    Json(json!({
        "ok": true,
        "freq": "H",
        "site": null,
        "series": [
            {"ts": "2024-01-01 08:00", "energy_kwh": 7.5, "sessions": 1},
            {"ts": "2024-01-01 09:00", "energy_kwh": 0.0, "sessions": 0},
        ],
    }))
}

async fn diagnostics(State(requests): State<Recorded>, uri: Uri) -> Json<Value> {
    record(&requests, &uri, Value::Null);
    Json(json!({
        "ok": true,
        "lags": 2,
        "acf": [1.0, 0.5, null],
        "pacf": [1.0, 0.1, 0.02],
        "series_length": 100,
    }))
}

async fn forecast(State(requests): State<Recorded>, uri: Uri, Json(body): Json<Value>) -> Json<Value> {
    let site = body["site"].as_str().map(str::to_string);
    record(&requests, &uri, body);
    if site.as_deref() == Some("nowhere") {
        return Json(json!({"ok": false, "message": "No sessions for site nowhere"}));
    }
    Json(json!({
        "ok": true,
        "model_id": "energy_H_(1, 1, 1)",
        "order": [1, 1, 1],
        "seasonal_order": [0, 1, 1, 24],
        "metric": "energy",
        "freq": "H",
        "horizon": 2,
        "test_size": 1,
        "metrics": {"MAE": 2.0, "RMSE": 2.0, "MAPE": 6.67},
        "history": [
            {"ts": "2024-01-01 01:00", "y": 20.0},
            {"ts": "2024-01-01 00:00", "y": 10.0},
        ],
        "validation": [{"ts": "2024-01-01 02:00", "y_true": 30.0, "y_pred": 28.0}],
        "forecast": [
            {"ts": "2024-01-01 04:00", "y_pred": 42.0, "lower": 36.0, "upper": 48.0},
            {"ts": "2024-01-01 03:00", "y_pred": 40.0, "lower": 35.0, "upper": 45.0},
        ],
    }))
}

async fn download_csv() -> Response {
    rejected(StatusCode::BAD_REQUEST, "Run a forecast first")
}

#[derive(serde::Deserialize)]
struct Limit {
    limit: Option<u32>,
}

async fn limited(Query(limit): Query<Limit>, state: State<Recorded>, uri: Uri) -> Json<Value> {
    assert!(limit.limit.is_some(), "previews are always requested with a limit");
    raw(state, uri).await
}

pub fn mock_router(requests: Recorded) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/ingest-json", post(ingest))
        .route("/raw", get(limited))
        .route("/raw_filled", get(limited))
        .route("/clean", get(clean))
        .route("/series", get(series))
        .route("/diagnostics", get(diagnostics))
        .route("/forecast", post(forecast))
        .route("/download/forecast.csv", get(download_csv))
        .with_state(requests)
}

/// Serves the mock on an ephemeral port and returns a client pointed at it.
pub async fn spawn_mock_service() -> MockService {
    let requests: Recorded = Arc::default();
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("Mock service has no address");

    let app = mock_router(requests.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock service stopped");
    });

    let config = ClientConfig::new(&format!("http://{}", addr), 5).expect("Invalid mock config");
    let client = ForecastClient::new(config).expect("Failed to build client");
    MockService { client, requests }
}

/// Client for a port nothing listens on.
pub async fn unreachable_client() -> ForecastClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Probe port has no address");
    drop(listener);

    let config = ClientConfig::new(&format!("http://{}", addr), 2).expect("Invalid config");
    ForecastClient::new(config).expect("Failed to build client")
}
