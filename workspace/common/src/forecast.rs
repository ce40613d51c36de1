use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::series::{
    build_forecast_series, merge_history_validation, ForecastSample, HistorySample, TimePoint,
    ValidationSample,
};
use crate::window::DisplayWindow;

/// Aggregated quantity the model is fitted on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Delivered energy per bucket, in kWh
    #[default]
    Energy,
    /// Number of charging sessions per bucket
    Sessions,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Energy, Metric::Sessions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Energy => "energy",
            Metric::Sessions => "sessions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Energy => "Energy (kWh)",
            Metric::Sessions => "Sessions",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "energy" => Ok(Metric::Energy),
            "sessions" => Ok(Metric::Sessions),
            other => Err(format!("metric must be 'energy' or 'sessions', got '{}'", other)),
        }
    }
}

/// Bucketing frequency of the aggregated series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Frequency {
    #[default]
    #[serde(rename = "H")]
    Hourly,
    #[serde(rename = "D")]
    Daily,
}

impl Frequency {
    pub const ALL: [Frequency; 2] = [Frequency::Hourly, Frequency::Daily];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Hourly => "H",
            Frequency::Daily => "D",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Hourly => "Hourly",
            Frequency::Daily => "Daily",
        }
    }

    /// Seasonal period matching one day (hourly) or one week (daily).
    pub fn natural_season(&self) -> u32 {
        match self {
            Frequency::Hourly => 24,
            Frequency::Daily => 7,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "H" | "h" | "hourly" => Ok(Frequency::Hourly),
            "D" | "d" | "daily" => Ok(Frequency::Daily),
            other => Err(format!("freq must be 'H' or 'D', got '{}'", other)),
        }
    }
}

/// Non-seasonal ARIMA order `(p, d, q)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelOrder(pub u32, pub u32, pub u32);

impl Default for ModelOrder {
    fn default() -> Self {
        ModelOrder(1, 1, 1)
    }
}

impl fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Seasonal order `(P, D, Q, s)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SeasonalOrder(pub u32, pub u32, pub u32, pub u32);

impl fmt::Display for SeasonalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.0, self.1, self.2, self.3)
    }
}

/// Request body for `POST /forecast` (mirrors the service's request model).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ForecastRequest {
    pub site: Option<String>,
    pub metric: Metric,
    pub freq: Frequency,
    #[validate(range(min = 1, max = 8760))]
    pub seasonal_period: u32,
    #[validate(range(min = 1, max = 10000))]
    pub horizon: u32,
    #[validate(range(max = 10000))]
    pub test_size: u32,
    pub auto_grid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<ModelOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_order: Option<SeasonalOrder>,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            site: None,
            metric: Metric::Energy,
            freq: Frequency::Hourly,
            seasonal_period: 24,
            horizon: 48,
            test_size: 48,
            auto_grid: true,
            order: None,
            seasonal_order: None,
        }
    }
}

impl ForecastRequest {
    /// Validates ranges and returns the body to send.
    ///
    /// Explicit orders are only meaningful without the automatic search, so
    /// they are dropped when `auto_grid` is set. An empty site means all sites.
    pub fn prepared(&self) -> Result<Self> {
        self.validate()?;

        let mut body = self.clone();
        if body.auto_grid {
            body.order = None;
            body.seasonal_order = None;
        }
        if body.site.as_deref().map(str::trim).is_some_and(str::is_empty) {
            body.site = None;
        }
        debug!(?body, "Prepared forecast request");
        Ok(body)
    }
}

/// Validation accuracy reported by the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AccuracyMetrics {
    #[serde(rename = "MAE", default)]
    pub mae: Option<f64>,
    #[serde(rename = "RMSE", default)]
    pub rmse: Option<f64>,
    /// Mean absolute percentage error, already scaled to percent
    #[serde(rename = "MAPE", default)]
    pub mape: Option<f64>,
}

/// `null` and a missing field both become an empty list.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reply payload of `POST /forecast`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastResult {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub order: Option<ModelOrder>,
    #[serde(default)]
    pub seasonal_order: Option<SeasonalOrder>,
    #[serde(default)]
    pub metric: Option<Metric>,
    #[serde(default)]
    pub freq: Option<Frequency>,
    #[serde(default)]
    pub horizon: Option<u32>,
    #[serde(default)]
    pub test_size: Option<u32>,
    #[serde(default)]
    pub metrics: Option<AccuracyMetrics>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub history: Vec<HistorySample>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub validation: Vec<ValidationSample>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub forecast: Vec<ForecastSample>,
}

/// The two chart-ready sequences derived from one forecast result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastCharts {
    /// History and validation, actual vs. predicted
    pub overlay: Vec<TimePoint>,
    /// Future forecast with bounds, anchored to the last history sample
    pub forecast: Vec<TimePoint>,
}

impl ForecastCharts {
    /// Derives both sequences; no result yields two empty sequences.
    pub fn from_result(result: Option<&ForecastResult>) -> Self {
        match result {
            Some(result) => Self {
                overlay: merge_history_validation(&result.history, &result.validation),
                forecast: build_forecast_series(&result.forecast, result.history.last()),
            },
            None => Self::default(),
        }
    }

    /// Applies the same display window to both sequences.
    pub fn windowed(&self, window: &DisplayWindow) -> Self {
        Self {
            overlay: window.apply(&self.overlay),
            forecast: window.apply(&self.forecast),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overlay.is_empty() && self.forecast.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiResponse;

    const REPLY: &str = r#"{
        "ok": true,
        "model_id": "energy_H_(1,1,1)_(0,0,0,0)",
        "order": [1, 1, 1],
        "seasonal_order": [0, 0, 0, 0],
        "metric": "energy",
        "freq": "H",
        "horizon": 2,
        "test_size": 1,
        "metrics": {"MAE": 1.5, "RMSE": 2.0, "MAPE": 7.25},
        "history": [
            {"ts": "2024-01-01 00:00:00", "y": 10.0},
            {"ts": "2024-01-01 01:00:00", "y": 20.0}
        ],
        "validation": [
            {"ts": "2024-01-01 01:00:00", "y_true": 20.0, "y_pred": 18.5}
        ],
        "forecast": [
            {"ts": "2024-01-01 02:00:00", "y_pred": 21.0, "lower": 19.0, "upper": 23.0},
            {"ts": "2024-01-01 03:00:00", "y_pred": 22.0, "lower": 18.0, "upper": 26.0}
        ]
    }"#;

    #[test]
    fn test_forecast_reply_deserializes() {
        let reply: ApiResponse<ForecastResult> = serde_json::from_str(REPLY).unwrap();
        let (result, _) = reply.into_result().unwrap();

        assert_eq!(result.order, Some(ModelOrder(1, 1, 1)));
        assert_eq!(result.seasonal_order, Some(SeasonalOrder(0, 0, 0, 0)));
        assert_eq!(result.metric, Some(Metric::Energy));
        assert_eq!(result.freq, Some(Frequency::Hourly));
        assert_eq!(result.metrics.unwrap().mape, Some(7.25));
        assert_eq!(result.history.len(), 2);
        assert_eq!(result.validation.len(), 1);
        assert_eq!(result.forecast.len(), 2);
    }

    #[test]
    fn test_permissive_reply_shape() {
        let body = r#"{"ok": true, "validation": null, "metrics": null}"#;
        let reply: ApiResponse<ForecastResult> = serde_json::from_str(body).unwrap();
        let (result, _) = reply.into_result().unwrap();

        assert!(result.history.is_empty());
        assert!(result.validation.is_empty());
        assert!(result.forecast.is_empty());
        assert!(result.metrics.is_none());
        assert!(result.model_id.is_none());
    }

    #[test]
    fn test_charts_from_result() {
        let reply: ApiResponse<ForecastResult> = serde_json::from_str(REPLY).unwrap();
        let charts = ForecastCharts::from_result(Some(&reply.data));

        assert_eq!(charts.overlay.len(), 3);
        assert_eq!(charts.forecast.len(), 3);
        assert_eq!(charts.forecast[0].actual, Some(20.0));
        assert_eq!(charts.forecast[0].predicted, None);

        let tail = charts.windowed(&DisplayWindow::new(50.0, None));
        assert_eq!(tail.overlay.len(), 2);
        assert_eq!(tail.forecast.len(), 2);
    }

    #[test]
    fn test_charts_without_result_are_empty() {
        assert!(ForecastCharts::from_result(None).is_empty());
    }

    #[test]
    fn test_request_defaults_serialize_like_service_defaults() {
        let body = serde_json::to_value(ForecastRequest::default()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "site": null,
                "metric": "energy",
                "freq": "H",
                "seasonal_period": 24,
                "horizon": 48,
                "test_size": 48,
                "auto_grid": true
            })
        );
    }

    #[test]
    fn test_prepared_drops_orders_under_auto_grid() {
        let request = ForecastRequest {
            order: Some(ModelOrder(2, 1, 0)),
            seasonal_order: Some(SeasonalOrder(1, 0, 1, 24)),
            site: Some("  ".to_string()),
            ..Default::default()
        };

        let body = request.prepared().unwrap();
        assert!(body.order.is_none());
        assert!(body.seasonal_order.is_none());
        assert!(body.site.is_none());

        let manual = ForecastRequest {
            auto_grid: false,
            ..request
        };
        let body = manual.prepared().unwrap();
        assert_eq!(body.order, Some(ModelOrder(2, 1, 0)));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["order"], serde_json::json!([2, 1, 0]));
        assert_eq!(json["seasonal_order"], serde_json::json!([1, 0, 1, 24]));
    }

    #[test]
    fn test_prepared_rejects_out_of_range() {
        let request = ForecastRequest {
            horizon: 0,
            ..Default::default()
        };
        assert!(request.prepared().is_err());

        let request = ForecastRequest {
            seasonal_period: 0,
            ..Default::default()
        };
        assert!(request.prepared().is_err());
    }

    #[test]
    fn test_metric_and_frequency_parse() {
        assert_eq!("Energy".parse::<Metric>(), Ok(Metric::Energy));
        assert_eq!("sessions".parse::<Metric>(), Ok(Metric::Sessions));
        assert!("power".parse::<Metric>().is_err());
        assert_eq!("D".parse::<Frequency>(), Ok(Frequency::Daily));
        assert_eq!("hourly".parse::<Frequency>(), Ok(Frequency::Hourly));
        assert!("W".parse::<Frequency>().is_err());
    }
}
