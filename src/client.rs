//! HTTP client for the remote forecast service.

use std::path::Path;

use anyhow::{Context, Result};
use common::ingest::IngestPayload;
use common::{
    AggregatedSeries, ApiResponse, CleanedPreview, DataPreview, Diagnostics, DiagnosticsQuery,
    ForecastRequest, ForecastResult, Frequency, Health, IngestReceipt, UploadReceipt,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::ClientConfig;

/// Payload plus the service's status message.
pub type Reply<T> = (T, Option<String>);

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered HTTP {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected reply from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures usually still carry an envelope with the reason.
fn failure_message(body: String) -> String {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
        .ok()
        .and_then(|reply| reply.message)
        .unwrap_or(body)
}

#[derive(Clone)]
pub struct ForecastClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl ForecastClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_url
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<(reqwest::StatusCode, String), ServiceError> {
        let transport = |source| ServiceError::Transport {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        trace!(%url, %status, bytes = body.len(), "Reply received");
        Ok((status, body))
    }

    /// Checks the HTTP status, decodes the envelope and unwraps `ok: false`.
    async fn read_reply<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<Reply<T>, ServiceError> {
        let (status, body) = self.send(url, request).await?;

        if !status.is_success() {
            let message = failure_message(body);
            warn!(%url, %status, %message, "Non-OK response");
            return Err(ServiceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let reply: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|source| ServiceError::Decode {
                url: url.to_string(),
                source,
            })?;
        reply.into_result().map_err(|message| {
            warn!(%url, %message, "Request rejected by the service");
            ServiceError::Rejected(message)
        })
    }

    async fn get_reply<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Reply<T>> {
        let url = self.config.url(endpoint);
        debug!("GET request to: {}", url);
        Ok(self.read_reply(&url, self.client.get(&url)).await?)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.get_reply(endpoint).await.map(|(data, _)| data)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<T> {
        let url = self.config.url(endpoint);
        debug!("POST request to: {}", url);
        let (data, _) = self.read_reply(&url, self.client.post(&url).json(body)).await?;
        Ok(data)
    }

    pub async fn health(&self) -> Result<Health> {
        self.get("/health").await.context("Failed to reach the forecast service")
    }

    /// Posts a CSV file as the `file` field of a multipart form.
    pub async fn upload_csv(&self, path: &Path) -> Result<UploadReceipt> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        trace!(%file_name, bytes = bytes.len(), "Uploading CSV file");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/csv")
            .context("Failed to build upload form")?;
        let form = Form::new().part("file", part);

        let url = self.config.url("/upload");
        debug!("POST (multipart) request to: {}", url);
        let (receipt, _) = self
            .read_reply(&url, self.client.post(&url).multipart(form))
            .await
            .context("Failed to upload CSV")?;
        Ok(receipt)
    }

    pub async fn ingest_json(&self, payload: &IngestPayload) -> Result<IngestReceipt> {
        trace!(items = payload.item_count(), "Ingesting JSON payload");
        self.post("/ingest-json", payload.body())
            .await
            .context("Failed to ingest JSON")
    }

    /// Raw (`filled = false`) or forward-filled preview plus the status message.
    pub async fn raw_preview(&self, filled: bool, limit: u32) -> Result<Reply<DataPreview>> {
        self.get_reply(&DataPreview::endpoint(filled, limit))
            .await
            .context("Failed to fetch raw preview")
    }

    pub async fn cleaned_preview(
        &self,
        site: Option<&str>,
        freq: Frequency,
        limit: u32,
    ) -> Result<CleanedPreview> {
        let (mut cleaned, message): Reply<CleanedPreview> = self
            .get_reply(&CleanedPreview::endpoint(site, freq, limit))
            .await
            .context("Failed to fetch cleaned preview")?;
        cleaned.summary = message;
        Ok(cleaned)
    }

    pub async fn series(&self, site: Option<&str>, freq: Frequency) -> Result<AggregatedSeries> {
        self.get(&AggregatedSeries::endpoint(site, freq))
            .await
            .context("Failed to fetch aggregated series")
    }

    pub async fn diagnostics(&self, query: &DiagnosticsQuery) -> Result<Diagnostics> {
        let endpoint = query.endpoint()?;
        self.get(&endpoint).await.context("Failed to fetch diagnostics")
    }

    pub async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        let body = request.prepared()?;
        self.post("/forecast", &body).await.context("Failed to run forecast")
    }

    /// The service's own CSV of its last forecast.
    pub async fn download_forecast_csv(&self) -> Result<String> {
        let url = self.config.url("/download/forecast.csv");
        debug!("GET request to: {}", url);
        let (status, body) = self.send(&url, self.client.get(&url)).await?;
        if status.is_success() {
            return Ok(body);
        }

        Err(ServiceError::Status {
            url,
            status: status.as_u16(),
            message: failure_message(body),
        })
        .context("Failed to download forecast CSV")
    }
}
