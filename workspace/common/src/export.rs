//! Client-side CSV export of forecast rows.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{DashboardError, Result};
use crate::series::ForecastSample;

/// Header row of the export.
pub const FORECAST_CSV_HEADER: [&str; 4] = ["ts", "y_pred", "lower", "upper"];

/// Suggested file name for downloads.
pub const FORECAST_CSV_FILE_NAME: &str = "forecast.csv";

/// Numbers use the shortest round-trip form (`1.0` is written as `1`); missing
/// values are written as empty fields.
fn number(value: Option<f64>) -> String {
    value.map(shortest).unwrap_or_default()
}

/// Positional notation for `1e-6 <= |v| < 1e21`, exponent notation
/// (`1e+21`, `2.5e-8`) outside that range.
fn shortest(value: f64) -> String {
    let magnitude = value.abs();
    if !value.is_finite() || value == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// Serializes forecast rows as `ts,y_pred,lower,upper` with a header row.
///
/// Rows are separated by `\n` and the text has no trailing newline.
pub fn forecast_csv(rows: &[ForecastSample]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(FORECAST_CSV_HEADER)?;
    for row in rows {
        writer.write_record([
            row.ts.clone(),
            number(row.y_pred),
            number(row.lower),
            number(row.upper),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| DashboardError::Export(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
