use std::io::Write;

use common::ingest::IngestPayload;
use common::{DiagnosticsQuery, DisplayWindow, ForecastRequest, Frequency, Metric, ModelOrder};
use tempfile::NamedTempFile;

use crate::cli::{ForecastArgs, Scope};
use crate::cli::commands::{clean, forecast, health, ingest, raw, series, upload};
use crate::client::ServiceError;
use crate::test_utils::{spawn_mock_service, unreachable_client};

fn forecast_args(export: Option<std::path::PathBuf>) -> ForecastArgs {
    ForecastArgs {
        scope: Scope {
            site: None,
            freq: Frequency::Hourly,
        },
        metric: Metric::Energy,
        seasonal_period: 24,
        horizon: 2,
        test_size: 1,
        no_auto_grid: false,
        order: Some(vec![2, 1, 2]),
        seasonal_order: None,
        window_percent: 100.0,
        stride: None,
        export,
    }
}

#[tokio::test]
async fn test_health_check() {
    let mock = spawn_mock_service().await;

    let health = mock.client.health().await.unwrap();

    assert_eq!(health.status.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_health_command_accepts_reply_without_ok_flag() {
    let mock = spawn_mock_service().await;

    let report = health(&mock.client).await.unwrap();

    assert!(report.ends_with(": ok"));
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    let client = unreachable_client().await;

    let err = client.health().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ServiceError>(),
        Some(ServiceError::Transport { .. })
    ));
}

#[tokio::test]
async fn test_upload_sends_multipart_file_field() {
    let mock = spawn_mock_service().await;
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "connectionTime,siteID,kWhDelivered").unwrap();
    writeln!(file, "2024-01-01 08:00,1,7.5").unwrap();
    writeln!(file, "2024-01-01 09:30,2,3.1").unwrap();

    let report = upload(&mock.client, file.path()).await.unwrap();

    assert_eq!(report, "Uploaded 2 rows (csv)");
    let (_, body) = mock.request("/upload").unwrap();
    assert_eq!(body["rows"], 2);
}

#[tokio::test]
async fn test_ingest_posts_the_parsed_dump() {
    let mock = spawn_mock_service().await;
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"_meta": {{"end": "2024"}}, "_items": [{{"siteID": 1, "kWhDelivered": 7.5}}]}}"#
    )
    .unwrap();

    let report = ingest(&mock.client, file.path(), false).await.unwrap();

    assert_eq!(report, "Ingested 1 rows with 2 columns: kWhDelivered, siteID");
    let (_, body) = mock.request("/ingest-json").unwrap();
    assert_eq!(body["_meta"]["end"], "2024");
}

#[tokio::test]
async fn test_ingest_rejects_invalid_format_without_sending() {
    let mock = spawn_mock_service().await;
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"[{{"siteID": 1}}]"#).unwrap();

    let err = ingest(&mock.client, file.path(), false).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid format");
    assert!(mock.request("/ingest-json").is_none());
}

#[tokio::test]
async fn test_ingest_recovers_truncated_dump() {
    let mock = spawn_mock_service().await;
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"_items": [{{"siteID": 1, "kWhDelivered": 7.5}}, {{"siteID": 2, "kWhDeliv"#
    )
    .unwrap();

    assert!(ingest(&mock.client, file.path(), false).await.is_err());
    let report = ingest(&mock.client, file.path(), true).await.unwrap();

    assert!(report.starts_with("Ingested 1 rows"));
}

#[tokio::test]
async fn test_raw_preview_requests_limit() {
    let mock = spawn_mock_service().await;

    let report = raw(&mock.client, true, 5).await.unwrap();

    let (path, _) = mock.request("/raw_filled").unwrap();
    assert_eq!(path, "/raw_filled?limit=5");
    assert!(report.starts_with("Forward-filled preview: 2 rows total, 3 columns, source sessions.csv"));
    assert!(report.contains("2024-01-01 09:30"));
}

#[tokio::test]
async fn test_clean_keeps_summary_and_sorts_null_counts() {
    let mock = spawn_mock_service().await;
    let scope = Scope {
        site: Some("caltech".to_string()),
        freq: Frequency::Daily,
    };

    let cleaned = mock
        .client
        .cleaned_preview(scope.site.as_deref(), scope.freq, 10)
        .await
        .unwrap();

    assert_eq!(
        cleaned.summary.as_deref(),
        Some("Aggregated 2 sessions into 1 hourly buckets")
    );
    assert_eq!(cleaned.null_counts_desc()[0], ("energy_kwh".to_string(), 3));

    let report = clean(&mock.client, &scope, 10).await.unwrap();
    assert!(report.lines().next().unwrap().starts_with("Aggregated"));
    let (path, _) = mock.request("/clean").unwrap();
    assert!(path.contains("site=caltech"));
    assert!(path.contains("freq=D"));
}

#[tokio::test]
async fn test_series_report() {
    let mock = spawn_mock_service().await;
    let scope = Scope {
        site: None,
        freq: Frequency::Hourly,
    };

    let report = series(&mock.client, &scope).await.unwrap();

    assert!(report.starts_with("Hourly series for all sites"));
    assert!(report.contains("2024-01-01 09:00  0.000"));
}

#[tokio::test]
async fn test_diagnostics_query_parameters() {
    let mock = spawn_mock_service().await;
    let query = DiagnosticsQuery {
        metric: Metric::Sessions,
        freq: Frequency::Hourly,
        site: None,
        nlags: 2,
    };

    let diagnostics = mock.client.diagnostics(&query).await.unwrap();

    assert_eq!(diagnostics.acf_points(), vec![(0, 1.0), (1, 0.5)]);
    let (path, _) = mock.request("/diagnostics").unwrap();
    assert_eq!(path, "/diagnostics?metric=sessions&freq=H&nlags=2");
}

#[tokio::test]
async fn test_forecast_drops_orders_under_auto_grid() {
    let mock = spawn_mock_service().await;
    let request = ForecastRequest {
        order: Some(ModelOrder(2, 1, 2)),
        ..Default::default()
    };

    let result = mock.client.forecast(&request).await.unwrap();

    assert_eq!(result.model_id.as_deref(), Some("energy_H_(1, 1, 1)"));
    let (_, body) = mock.request("/forecast").unwrap();
    assert_eq!(body["auto_grid"], true);
    assert!(body.get("order").is_none());
}

#[tokio::test]
async fn test_forecast_rejection_carries_service_message() {
    let mock = spawn_mock_service().await;
    let request = ForecastRequest {
        site: Some("nowhere".to_string()),
        ..Default::default()
    };

    let err = mock.client.forecast(&request).await.unwrap_err();

    match err.downcast_ref::<ServiceError>() {
        Some(ServiceError::Rejected(message)) => {
            assert_eq!(message, "No sessions for site nowhere")
        }
        other => panic!("expected a rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_forecast_report_and_export() {
    let mock = spawn_mock_service().await;
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("forecast.csv");

    let report = forecast(&mock.client, &forecast_args(Some(export.clone())))
        .await
        .unwrap();

    assert!(report.contains("MAE 2.000  RMSE 2.000  MAPE 6.670%"));
    assert!(report.contains("Actual vs predicted (3 points)"));
    // anchor from the last history sample plus two forecast rows
    assert!(report.contains("Forecast (3 points)"));
    let csv = std::fs::read_to_string(&export).unwrap();
    assert_eq!(
        csv,
        "ts,y_pred,lower,upper\n2024-01-01 04:00,42,36,48\n2024-01-01 03:00,40,35,45"
    );
}

#[tokio::test]
async fn test_forecast_window_applies_to_both_tables() {
    let mock = spawn_mock_service().await;
    let result = mock.client.forecast(&ForecastRequest::default()).await.unwrap();

    let report = crate::cli::commands::forecast::render(&result, &DisplayWindow::new(34.0, None));

    // floor(3 * 0.66) = 1, so the last two points of each series remain
    assert!(report.contains("Actual vs predicted (2 points)"));
    assert!(report.contains("Forecast (2 points)"));
    assert!(!report.contains("2024-01-01 00:00"));
}

#[tokio::test]
async fn test_server_csv_failure_is_a_status_error() {
    let mock = spawn_mock_service().await;

    let err = mock.client.download_forecast_csv().await.unwrap_err();

    match err.downcast_ref::<ServiceError>() {
        Some(ServiceError::Status { status, message, .. }) => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Run a forecast first");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[test]
fn test_ingest_payload_matches_paste_rules() {
    assert!(IngestPayload::parse(r#"{"_items": []}"#).is_err());
    assert!(IngestPayload::parse(r#"{"_items": [{"siteID": 1}]}"#).is_ok());
}
