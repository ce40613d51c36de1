use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::forecast::{null_as_empty, Frequency};

/// One record of a tabular preview, keyed by column name.
pub type PreviewRow = Map<String, Value>;

/// Reply payload of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Health {
    #[serde(default)]
    pub status: Option<String>,
}

/// Reply payload of `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UploadReceipt {
    #[serde(default)]
    pub rows: Option<u64>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Reply payload of `POST /ingest-json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IngestReceipt {
    #[serde(default)]
    pub rows: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: Vec<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Reply payload of `GET /raw` and `GET /raw_filled`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DataPreview {
    #[serde(default)]
    pub total_rows: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub preview: Vec<PreviewRow>,
    #[serde(default)]
    pub source: Option<String>,
}

impl DataPreview {
    pub fn endpoint(filled: bool, limit: u32) -> String {
        let path = if filled { "/raw_filled" } else { "/raw" };
        format!("{}?limit={}", path, limit)
    }

    /// Header and stringified cells, in the column order the service reported.
    pub fn table(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let columns = if self.columns.is_empty() {
            columns_of(&self.preview)
        } else {
            self.columns.clone()
        };
        let rows = cells(&columns, &self.preview);
        (columns, rows)
    }
}

/// Reply payload of `GET /clean`.
///
/// The service's summary text travels in the envelope `message`; clients copy
/// it into `summary` after unwrapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CleanedPreview {
    #[serde(skip)]
    pub summary: Option<String>,
    #[serde(default)]
    pub null_counts: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub preview: Vec<PreviewRow>,
}

impl CleanedPreview {
    pub fn endpoint(site: Option<&str>, freq: Frequency, limit: u32) -> String {
        let mut url = format!("/clean?freq={}&limit={}", freq, limit);
        push_site(&mut url, site);
        url
    }

    /// Null counts of the raw columns, largest first; ties by column name.
    pub fn null_counts_desc(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = self
            .null_counts
            .iter()
            .map(|(column, count)| (column.clone(), count.as_u64().unwrap_or(0)))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Header and stringified cells; `ts` first when present.
    pub fn table(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let columns = columns_of(&self.preview);
        let rows = cells(&columns, &self.preview);
        (columns, rows)
    }
}

/// One bucket of the aggregated series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregatedPoint {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub energy_kwh: Option<f64>,
    #[serde(default)]
    pub sessions: Option<u64>,
}

/// Reply payload of `GET /series`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregatedSeries {
    #[serde(default)]
    pub freq: Option<Frequency>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub series: Vec<AggregatedPoint>,
}

impl AggregatedSeries {
    pub fn endpoint(site: Option<&str>, freq: Frequency) -> String {
        let mut url = format!("/series?freq={}", freq);
        push_site(&mut url, site);
        url
    }
}

fn push_site(url: &mut String, site: Option<&str>) {
    if let Some(site) = site.map(str::trim).filter(|s| !s.is_empty()) {
        url.push_str(&format!("&site={}", urlencoding::encode(site)));
    }
}

/// Column names in first-seen order across all rows, `ts` promoted to front.
fn columns_of(rows: &[PreviewRow]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    if let Some(pos) = columns.iter().position(|c| c == "ts") {
        let ts = columns.remove(pos);
        columns.insert(0, ts);
    }
    columns
}

fn cells(columns: &[String], rows: &[PreviewRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Display text of a preview cell: `null` is blank, strings are unquoted.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiResponse;

    #[test]
    fn test_raw_preview_table_follows_reported_columns() {
        let body = r#"{
            "ok": true, "total_rows": 2, "columns": ["sessionID", "kWhDelivered", "userID"],
            "preview": [
                {"kWhDelivered": 7.5, "sessionID": "a", "userID": null},
                {"kWhDelivered": 3, "sessionID": "b", "userID": "u-1"}
            ],
            "source": "ACN-data.csv"
        }"#;
        let reply: ApiResponse<DataPreview> = serde_json::from_str(body).unwrap();
        let (preview, _) = reply.into_result().unwrap();

        let (columns, rows) = preview.table();
        assert_eq!(columns, vec!["sessionID", "kWhDelivered", "userID"]);
        assert_eq!(rows[0], vec!["a", "7.5", ""]);
        assert_eq!(rows[1], vec!["b", "3", "u-1"]);
    }

    #[test]
    fn test_empty_raw_preview_keeps_message() {
        let body = r#"{"ok": true, "total_rows": 0, "columns": [], "preview": [],
                       "message": "No ACN-data.csv yet. Upload CSV or ingest JSON first."}"#;
        let reply: ApiResponse<DataPreview> = serde_json::from_str(body).unwrap();
        let (preview, message) = reply.into_result().unwrap();

        assert_eq!(preview.total_rows, Some(0));
        assert!(preview.table().1.is_empty());
        assert!(message.unwrap().starts_with("No ACN-data.csv"));
    }

    #[test]
    fn test_cleaned_preview_puts_ts_first_and_sorts_nulls() {
        let body = r#"{
            "ok": true,
            "message": "Data successfully aggregated",
            "null_counts": {"userID": 10, "WhPerMile": 25, "siteID": 0, "kWhRequested": 25},
            "preview": [{"energy_kwh": 1.25, "sessions": 2, "ts": 1577836800000}]
        }"#;
        let reply: ApiResponse<CleanedPreview> = serde_json::from_str(body).unwrap();
        let (cleaned, _) = reply.into_result().unwrap();

        let (columns, rows) = cleaned.table();
        assert_eq!(columns[0], "ts");
        assert_eq!(rows[0][0], "1577836800000");

        let nulls = cleaned.null_counts_desc();
        assert_eq!(
            nulls,
            vec![
                ("WhPerMile".to_string(), 25),
                ("kWhRequested".to_string(), 25),
                ("userID".to_string(), 10),
                ("siteID".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(DataPreview::endpoint(false, 100), "/raw?limit=100");
        assert_eq!(DataPreview::endpoint(true, 50), "/raw_filled?limit=50");
        assert_eq!(
            CleanedPreview::endpoint(Some(" caltech "), Frequency::Daily, 200),
            "/clean?freq=D&limit=200&site=caltech"
        );
        assert_eq!(
            CleanedPreview::endpoint(Some(""), Frequency::Hourly, 10),
            "/clean?freq=H&limit=10"
        );
        assert_eq!(
            AggregatedSeries::endpoint(None, Frequency::Hourly),
            "/series?freq=H"
        );
    }

    #[test]
    fn test_series_reply() {
        let body = r#"{"ok": true, "freq": "D", "site": "default",
                       "series": [{"ts": "2020-01-01 00:00:00", "energy_kwh": 12.5, "sessions": 3}]}"#;
        let reply: ApiResponse<AggregatedSeries> = serde_json::from_str(body).unwrap();
        let (series, _) = reply.into_result().unwrap();

        assert_eq!(series.freq, Some(Frequency::Daily));
        assert_eq!(series.series[0].sessions, Some(3));
    }
}
