//! Chart-ready points and the two merge operations feeding the modeling charts.
//!
//! The service returns three independent series: the observed history, the
//! held-out validation window (true vs. predicted) and the future forecast with
//! its confidence band. The charts need them as one chronologically sorted
//! sequence each:
//!
//! - [`merge_history_validation`] overlays actual and predicted values;
//! - [`build_forecast_series`] joins the forecast to the end of history through
//!   a single anchor point so the two lines connect visually.
//!
//! Both are pure: inputs are borrowed, a fresh `Vec` is returned, and equal
//! timestamps keep their input order.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A previously observed value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HistorySample {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub y: Option<f64>,
}

/// A held-out point where both the true and the model value are known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ValidationSample {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub y_true: Option<f64>,
    #[serde(default)]
    pub y_pred: Option<f64>,
}

/// A future point with the predicted value and its confidence bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastSample {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub y_pred: Option<f64>,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
}

/// A single chart-ready sample.
///
/// `timestamp` is kept exactly as the service sent it and is used as the chart
/// label; `at` is the parsed instant used for ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimePoint {
    pub timestamp: String,
    #[serde(skip)]
    pub at: Option<NaiveDateTime>,
    pub actual: Option<f64>,
    pub predicted: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

impl TimePoint {
    fn at(timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            at: parse_timestamp(timestamp),
            ..Default::default()
        }
    }

    /// Point derived from history: carries `actual` only.
    pub fn from_history(sample: &HistorySample) -> Self {
        Self {
            actual: sample.y,
            ..Self::at(&sample.ts)
        }
    }

    /// Point derived from validation: carries `actual` and `predicted`.
    pub fn from_validation(sample: &ValidationSample) -> Self {
        Self {
            actual: sample.y_true,
            predicted: sample.y_pred,
            ..Self::at(&sample.ts)
        }
    }

    /// Point derived from the future forecast: never carries `actual`.
    pub fn from_forecast(sample: &ForecastSample) -> Self {
        Self {
            predicted: sample.y_pred,
            lower_bound: sample.lower,
            upper_bound: sample.upper,
            ..Self::at(&sample.ts)
        }
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parses the timestamp shapes the service emits into a UTC-normalised instant.
///
/// Accepts RFC 3339, pandas' `str(Timestamp)` (with or without offset),
/// ISO date-times with or without seconds and a trailing `Z`, and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.naive_utc());
        }
    }

    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Stable ascending sort by instant; unparseable timestamps go last.
pub fn sort_chronologically(points: &mut [TimePoint]) {
    points.sort_by_key(|point| (point.at.is_none(), point.at));
}

/// Overlays history and validation into one sorted actual/predicted sequence.
///
/// Nothing is dropped or deduplicated: a validation point sharing a timestamp
/// with a history point is kept as a separate point after it.
pub fn merge_history_validation(
    history: &[HistorySample],
    validation: &[ValidationSample],
) -> Vec<TimePoint> {
    let mut merged: Vec<TimePoint> = history
        .iter()
        .map(TimePoint::from_history)
        .chain(validation.iter().map(TimePoint::from_validation))
        .collect();

    sort_chronologically(&mut merged);
    trace!(
        history = history.len(),
        validation = validation.len(),
        merged = merged.len(),
        "Merged history with validation"
    );
    merged
}

/// Builds the forecast sequence, anchored to the last history sample when
/// there is one.
///
/// The anchor carries only `actual`. The result is sorted without assuming the
/// anchor precedes the forecast.
pub fn build_forecast_series(
    forecast: &[ForecastSample],
    last_history: Option<&HistorySample>,
) -> Vec<TimePoint> {
    let mut series = Vec::with_capacity(forecast.len() + 1);
    if let Some(last) = last_history {
        series.push(TimePoint::from_history(last));
    }
    series.extend(forecast.iter().map(TimePoint::from_forecast));

    sort_chronologically(&mut series);
    trace!(
        forecast = forecast.len(),
        anchored = last_history.is_some(),
        "Built forecast series"
    );
    series
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    pub fn hour(h: u32) -> String {
        format!("2024-01-01 {:02}:00:00", h)
    }

    pub fn history(h: u32, y: f64) -> HistorySample {
        HistorySample {
            ts: hour(h),
            y: Some(y),
        }
    }

    pub fn validation(h: u32, y_true: f64, y_pred: f64) -> ValidationSample {
        ValidationSample {
            ts: hour(h),
            y_true: Some(y_true),
            y_pred: Some(y_pred),
        }
    }

    pub fn forecast(h: u32, y_pred: f64, lower: f64, upper: f64) -> ForecastSample {
        ForecastSample {
            ts: hour(h),
            y_pred: Some(y_pred),
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}
