//! Common transport-layer types shared between the CLI and the web frontend.
//!
//! The payload structs mirror the JSON produced by the remote forecast service
//! so both clients deserialize replies without duplicating shapes. The series
//! core (merge, forecast anchoring, display windowing, CSV export) lives here
//! too, so the browser and the terminal render exactly the same points.

mod data;
mod diagnostics;
mod error;
mod forecast;

pub mod export;
pub mod ingest;
pub mod series;
pub mod session;
pub mod window;

pub use data::{
    cell_text, AggregatedPoint, AggregatedSeries, CleanedPreview, DataPreview, Health,
    IngestReceipt, PreviewRow, UploadReceipt,
};
pub use diagnostics::{Diagnostics, DiagnosticsQuery};
pub use error::{DashboardError, Result};
pub use forecast::{
    AccuracyMetrics, ForecastCharts, ForecastRequest, ForecastResult, Frequency, Metric,
    ModelOrder, SeasonalOrder,
};
pub use series::{ForecastSample, HistorySample, TimePoint, ValidationSample};
pub use session::Session;
pub use window::DisplayWindow;

use serde::{Deserialize, Serialize};

/// Reply envelope used by every endpoint of the forecast service.
///
/// The service answers with a flat object: `ok`, an optional `message` and the
/// endpoint specific fields next to them. Those fields are flattened into
/// `data`, which is why every payload struct defaults each of its fields.
/// Replies without an `ok` field (`/health` answers `{"status": "ok"}`) count
/// as successful.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    /// Success flag
    #[serde(default = "default_ok")]
    pub ok: bool,
    /// Human readable status or failure reason
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint payload
    #[serde(flatten)]
    pub data: T,
}

fn default_ok() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Turns an `ok: false` reply into an error carrying the service message.
    pub fn into_result(self) -> std::result::Result<(T, Option<String>), String> {
        if self.ok {
            Ok((self.data, self.message))
        } else {
            Err(self
                .message
                .unwrap_or_else(|| "The forecast service rejected the request".to_string()))
        }
    }
}
