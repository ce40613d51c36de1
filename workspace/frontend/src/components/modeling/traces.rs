use common::TimePoint;
use plotly::common::{DashType, Fill, Line, Marker, Mode};
use plotly::{Bar, Scatter};
use serde::Serialize;
use serde_json::{json, Value};

const ACTUAL_COLOR: &str = "rgb(59, 130, 246)";
const PREDICTED_COLOR: &str = "rgb(234, 88, 12)";
const BAND_COLOR: &str = "rgba(234, 88, 12, 0.15)";
const BAND_EDGE: &str = "rgba(234, 88, 12, 0)";
const BAR_COLOR: &str = "rgb(16, 185, 129)";
const LIMIT_COLOR: &str = "rgb(239, 68, 68)";

fn trace_value<T: Serialize>(trace: T) -> Value {
    serde_json::to_value(trace).unwrap_or_else(|e| {
        log::error!("Failed to serialize chart trace: {}", e);
        Value::Null
    })
}

fn timestamps(points: &[TimePoint]) -> Vec<String> {
    points.iter().map(|p| p.timestamp.clone()).collect()
}

fn column(points: &[TimePoint], pick: impl Fn(&TimePoint) -> Option<f64>) -> Vec<Option<f64>> {
    points.iter().map(pick).collect()
}

/// Actual against predicted values over history and validation.
pub fn overlay_traces(points: &[TimePoint]) -> Value {
    let x = timestamps(points);

    let actual = Scatter::new(x.clone(), column(points, |p| p.actual))
        .name("Actual")
        .mode(Mode::Lines)
        .line(Line::new().color(ACTUAL_COLOR).width(2.0));
    // history and validation interleave at shared timestamps
    let predicted = Scatter::new(x, column(points, |p| p.predicted))
        .name("Predicted")
        .mode(Mode::Lines)
        .connect_gaps(true)
        .line(Line::new().color(PREDICTED_COLOR).width(2.0).dash(DashType::Dash));

    Value::Array(vec![trace_value(actual), trace_value(predicted)])
}

/// Forecast line inside its shaded confidence band.
///
/// The line starts at the anchor (the last observed value), which is also
/// marked on its own.
pub fn forecast_traces(points: &[TimePoint]) -> Value {
    let x = timestamps(points);

    // the band is drawn by filling the lower bound up to the upper one
    let upper = Scatter::new(x.clone(), column(points, |p| p.upper_bound))
        .name("Upper bound")
        .mode(Mode::Lines)
        .show_legend(false)
        .line(Line::new().color(BAND_EDGE).width(0.0));
    let lower = Scatter::new(x.clone(), column(points, |p| p.lower_bound))
        .name("Confidence band")
        .mode(Mode::Lines)
        .fill(Fill::ToNextY)
        .fill_color(BAND_COLOR)
        .line(Line::new().color(BAND_EDGE).width(0.0));
    let predicted = Scatter::new(x.clone(), column(points, |p| p.predicted.or(p.actual)))
        .name("Forecast")
        .mode(Mode::Lines)
        .connect_gaps(true)
        .line(Line::new().color(PREDICTED_COLOR).width(2.0));
    let actual = Scatter::new(x, column(points, |p| p.actual))
        .name("Last actual")
        .mode(Mode::Markers)
        .marker(Marker::new().color(ACTUAL_COLOR).size(8));

    Value::Array(vec![
        trace_value(upper),
        trace_value(lower),
        trace_value(predicted),
        trace_value(actual),
    ])
}

/// Correlation bars plus the significance limits when the band is known.
pub fn correlation_traces(name: &str, points: &[(usize, f64)], band: Option<f64>) -> Value {
    let lags: Vec<usize> = points.iter().map(|(lag, _)| *lag).collect();
    let values: Vec<f64> = points.iter().map(|(_, value)| *value).collect();

    let bars = Bar::new(lags.clone(), values)
        .name(name)
        .marker(Marker::new().color(BAR_COLOR));
    let mut traces = vec![trace_value(bars)];

    if let (Some(band), Some(first), Some(last)) = (band, lags.first(), lags.last()) {
        for (label, level) in [("+95%", band), ("-95%", -band)] {
            let limit = Scatter::new(vec![*first, *last], vec![level, level])
                .name(label)
                .mode(Mode::Lines)
                .show_legend(false)
                .line(Line::new().color(LIMIT_COLOR).width(1.0).dash(DashType::Dot));
            traces.push(trace_value(limit));
        }
    }

    Value::Array(traces)
}

pub fn time_layout(y_title: &str) -> Value {
    json!({
        "margin": {"t": 20, "r": 20, "b": 50, "l": 60},
        "xaxis": {"type": "date"},
        "yaxis": {"title": {"text": y_title}},
        "legend": {"orientation": "h"},
        "hovermode": "x unified",
    })
}

pub fn lag_layout() -> Value {
    json!({
        "margin": {"t": 20, "r": 20, "b": 50, "l": 60},
        "xaxis": {"title": {"text": "Lag"}},
        "yaxis": {"range": [-1.05, 1.05]},
        "bargap": 0.4,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ForecastCharts, ForecastResult, ForecastSample, HistorySample, ValidationSample};

    fn hour(h: u32) -> String {
        format!("2024-01-01 {:02}:00:00", h)
    }

    fn point(ts: &str, actual: Option<f64>, predicted: Option<f64>) -> TimePoint {
        TimePoint {
            timestamp: ts.to_string(),
            actual,
            predicted,
            ..Default::default()
        }
    }

    #[test]
    fn test_overlay_traces_keep_gaps_as_null() {
        let points = vec![
            point("2024-01-01 00:00", Some(1.0), None),
            point("2024-01-01 01:00", Some(2.0), Some(2.5)),
        ];

        let traces = overlay_traces(&points);

        assert_eq!(traces[0]["name"], "Actual");
        assert_eq!(traces[1]["y"], json!([null, 2.5]));
        assert_eq!(traces[0]["x"][1], "2024-01-01 01:00");
    }

    #[test]
    fn test_forecast_traces_fill_between_bounds() {
        let traces = forecast_traces(&[point("2024-01-01 00:00", None, Some(3.0))]);

        assert_eq!(traces.as_array().map(Vec::len), Some(4));
        assert_eq!(traces[1]["fill"], "tonexty");
    }

    fn service_reply() -> ForecastResult {
        // validation covers the tail of the history, as the service returns it
        ForecastResult {
            history: (0..7)
                .map(|h| HistorySample {
                    ts: hour(h),
                    y: Some(h as f64),
                })
                .collect(),
            validation: (3..7)
                .map(|h| ValidationSample {
                    ts: hour(h),
                    y_true: Some(h as f64),
                    y_pred: Some(h as f64 + 0.5),
                })
                .collect(),
            forecast: (7..9)
                .map(|h| ForecastSample {
                    ts: hour(h),
                    y_pred: Some(h as f64),
                    lower: Some(h as f64 - 1.0),
                    upper: Some(h as f64 + 1.0),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_overlay_predicted_line_spans_interleaved_points() {
        let charts = ForecastCharts::from_result(Some(&service_reply()));

        let traces = overlay_traces(&charts.overlay);

        assert_eq!(traces[1]["connectgaps"], true);
        let drawn = traces[1]["y"]
            .as_array()
            .map(|ys| ys.iter().filter(|y| !y.is_null()).count());
        assert_eq!(drawn, Some(4));
    }

    #[test]
    fn test_forecast_line_starts_at_last_actual() {
        let charts = ForecastCharts::from_result(Some(&service_reply()));

        let traces = forecast_traces(&charts.forecast);

        assert_eq!(traces[2]["x"][0], hour(6));
        assert_eq!(traces[2]["y"], json!([6.0, 7.0, 8.0]));
        assert_eq!(traces[3]["y"], json!([6.0, null, null]));
    }

    #[test]
    fn test_correlation_traces_add_limits_only_with_band() {
        let points = vec![(0, 1.0), (1, 0.4), (2, -0.1)];

        let without = correlation_traces("ACF", &points, None);
        let with = correlation_traces("ACF", &points, Some(0.2));

        assert_eq!(without.as_array().map(Vec::len), Some(1));
        assert_eq!(with.as_array().map(Vec::len), Some(3));
        assert_eq!(with[2]["y"], json!([-0.2, -0.2]));
    }
}
