use common::ingest::IngestPayload;
use common::{AggregatedSeries, CleanedPreview, DataPreview, Frequency, Health, IngestReceipt, UploadReceipt};
use web_sys::{File, FormData};
use crate::api_client;

pub async fn health() -> Result<Health, String> {
    api_client::get::<Health>("/health").await
}

/// Probes a service address that has not been saved yet.
pub async fn health_at(base_url: &str) -> Result<Health, String> {
    api_client::get_reply_from::<Health>(base_url, "/health")
        .await
        .map(|(health, _)| health)
}

/// Posts a CSV file as the `file` field of a multipart form.
pub async fn upload_csv(file: File) -> Result<UploadReceipt, String> {
    log::trace!("Uploading CSV file: {} ({} bytes)", file.name(), file.size());

    let form = FormData::new().map_err(|_| "Failed to create upload form".to_string())?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|_| "Failed to attach file to upload form".to_string())?;

    let result = api_client::post_form::<UploadReceipt>("/upload", form).await;

    match &result {
        Ok(receipt) => log::info!("Uploaded {} rows", receipt.rows.unwrap_or(0)),
        Err(e) => log::error!("Failed to upload CSV: {}", e),
    }

    result
}

pub async fn ingest_json(payload: IngestPayload) -> Result<IngestReceipt, String> {
    log::trace!("Ingesting JSON payload with {} items", payload.item_count());

    let result = api_client::post::<IngestReceipt, _>("/ingest-json", payload.body()).await;

    match &result {
        Ok(receipt) => log::info!(
            "Ingested {} rows with {} columns",
            receipt.rows.unwrap_or(0),
            receipt.columns.len()
        ),
        Err(e) => log::error!("Failed to ingest JSON: {}", e),
    }

    result
}

/// Raw (`filled = false`) or forward-filled preview plus the status message.
pub async fn get_raw_preview(filled: bool, limit: u32) -> Result<(DataPreview, Option<String>), String> {
    let url = DataPreview::endpoint(filled, limit);
    log::trace!("Fetching raw preview: {}", url);

    let result = api_client::get_reply::<DataPreview>(&url).await;

    if let Err(ref e) = result {
        log::error!("Failed to fetch raw preview: {}", e);
    }

    result
}

pub async fn get_cleaned_preview(
    site: Option<String>,
    freq: Frequency,
    limit: u32,
) -> Result<CleanedPreview, String> {
    let url = CleanedPreview::endpoint(site.as_deref(), freq, limit);
    log::trace!("Fetching cleaned preview: {}", url);

    let (mut cleaned, message) = api_client::get_reply::<CleanedPreview>(&url)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch cleaned preview: {}", e);
            e
        })?;
    cleaned.summary = message;

    log::info!("Fetched {} cleaned rows", cleaned.preview.len());
    Ok(cleaned)
}

pub async fn get_series(site: Option<String>, freq: Frequency) -> Result<AggregatedSeries, String> {
    let url = AggregatedSeries::endpoint(site.as_deref(), freq);
    log::trace!("Fetching aggregated series: {}", url);

    let result = api_client::get::<AggregatedSeries>(&url).await;

    match &result {
        Ok(series) => log::info!("Fetched {} aggregated points", series.series.len()),
        Err(e) => log::error!("Failed to fetch aggregated series: {}", e),
    }

    result
}
