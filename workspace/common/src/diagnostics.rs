use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::forecast::{null_as_empty, Frequency, Metric};

/// Query parameters for `GET /diagnostics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct DiagnosticsQuery {
    pub metric: Metric,
    pub freq: Frequency,
    pub site: Option<String>,
    /// Upper bound on lags; the service lowers it for short series
    #[validate(range(min = 1, max = 500))]
    pub nlags: u32,
}

impl Default for DiagnosticsQuery {
    fn default() -> Self {
        Self {
            metric: Metric::Energy,
            freq: Frequency::Hourly,
            site: None,
            nlags: 40,
        }
    }
}

impl DiagnosticsQuery {
    /// Relative URL including the query string.
    pub fn endpoint(&self) -> Result<String> {
        self.validate()?;

        let mut url = format!(
            "/diagnostics?metric={}&freq={}&nlags={}",
            self.metric, self.freq, self.nlags
        );
        if let Some(site) = self.site.as_deref().filter(|s| !s.trim().is_empty()) {
            url.push_str(&format!("&site={}", urlencoding::encode(site.trim())));
        }
        Ok(url)
    }
}

/// Reply payload of `GET /diagnostics`.
///
/// Coefficients the service could not compute arrive as `null` and stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Diagnostics {
    #[serde(default)]
    pub lags: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub acf: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pacf: Vec<Option<f64>>,
    #[serde(default)]
    pub series_length: Option<u64>,
}

impl Diagnostics {
    /// Approximate 95% significance band for the coefficients, `±1.96/√n`.
    pub fn confidence_band(&self) -> Option<f64> {
        self.series_length
            .filter(|&n| n > 0)
            .map(|n| 1.96 / (n as f64).sqrt())
    }

    /// `(lag, coefficient)` pairs of the autocorrelation, skipping gaps.
    pub fn acf_points(&self) -> Vec<(usize, f64)> {
        indexed(&self.acf)
    }

    /// `(lag, coefficient)` pairs of the partial autocorrelation, skipping gaps.
    pub fn pacf_points(&self) -> Vec<(usize, f64)> {
        indexed(&self.pacf)
    }
}

fn indexed(values: &[Option<f64>]) -> Vec<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(lag, value)| value.map(|v| (lag, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiResponse;

    #[test]
    fn test_endpoint_with_and_without_site() {
        let query = DiagnosticsQuery::default();
        assert_eq!(
            query.endpoint().unwrap(),
            "/diagnostics?metric=energy&freq=H&nlags=40"
        );

        let query = DiagnosticsQuery {
            metric: Metric::Sessions,
            freq: Frequency::Daily,
            site: Some("jpl lab".to_string()),
            nlags: 14,
        };
        assert_eq!(
            query.endpoint().unwrap(),
            "/diagnostics?metric=sessions&freq=D&nlags=14&site=jpl%20lab"
        );
    }

    #[test]
    fn test_endpoint_rejects_zero_lags() {
        let query = DiagnosticsQuery {
            nlags: 0,
            ..Default::default()
        };
        assert!(query.endpoint().is_err());
    }

    #[test]
    fn test_reply_with_null_coefficients() {
        let body = r#"{"ok": true, "lags": 3, "acf": [1.0, 0.5, null, 0.1],
                       "pacf": [1.0, 0.4, -0.2, null], "series_length": 100}"#;
        let reply: ApiResponse<Diagnostics> = serde_json::from_str(body).unwrap();
        let (diagnostics, _) = reply.into_result().unwrap();

        assert_eq!(diagnostics.acf_points(), vec![(0, 1.0), (1, 0.5), (3, 0.1)]);
        assert_eq!(diagnostics.pacf_points().len(), 3);
        assert!((diagnostics.confidence_band().unwrap() - 0.196).abs() < 1e-12);
    }

    #[test]
    fn test_not_enough_data_reply() {
        let body = r#"{"ok": false, "message": "Not enough data for diagnostics.", "series_length": 4}"#;
        let reply: ApiResponse<Diagnostics> = serde_json::from_str(body).unwrap();
        assert_eq!(reply.data.series_length, Some(4));
        assert!(reply.into_result().is_err());
    }
}
