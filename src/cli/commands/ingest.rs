use std::path::Path;

use anyhow::{Context, Result};
use common::ingest::IngestPayload;
use tracing::{debug, error, info, trace, warn};

use crate::client::ForecastClient;

/// Loads an ACN dump from disk and posts it to the ingestion endpoint.
///
/// The file is parsed the same way as text pasted into the web UI; with
/// `recover` a truncated dump keeps its complete records instead of failing.
pub async fn ingest(client: &ForecastClient, json_path: &Path, recover: bool) -> Result<String> {
    trace!("Entering ingest function");
    info!("Ingesting {}", json_path.display());

    let text = tokio::fs::read_to_string(json_path)
        .await
        .with_context(|| format!("Failed to read {}", json_path.display()))?;
    debug!("Read {} bytes", text.len());

    let payload = if recover {
        IngestPayload::recover(&text)
    } else {
        IngestPayload::parse(&text)
    };
    let payload = match payload {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Nothing sent, {} is not an ACN dump: {}", json_path.display(), e);
            return Err(e).context("Invalid format");
        }
    };
    info!("Parsed {} items", payload.item_count());

    match client.ingest_json(&payload).await {
        Ok(receipt) => {
            let rows = receipt.rows.unwrap_or(0);
            info!("Ingested {} rows", rows);
            Ok(format!(
                "Ingested {} rows with {} columns: {}",
                rows,
                receipt.columns.len(),
                receipt.columns.join(", ")
            ))
        }
        Err(e) => {
            error!("Ingestion failed: {:#}", e);
            Err(e)
        }
    }
}
