use anyhow::Result;
use common::{Diagnostics, DiagnosticsQuery};
use tracing::{info, trace};

use crate::client::ForecastClient;
use crate::output::render_table;

/// Marks coefficients outside the significance band with `*`.
fn coefficient(value: Option<f64>, band: Option<f64>) -> String {
    match (value, band) {
        (Some(v), Some(b)) if v.abs() > b => format!("{:.3}*", v),
        (Some(v), _) => format!("{:.3}", v),
        (None, _) => "-".to_string(),
    }
}

pub fn render(diagnostics: &Diagnostics) -> String {
    let band = diagnostics.confidence_band();
    let lags = diagnostics.acf.len().max(diagnostics.pacf.len());

    let columns = vec!["lag".to_string(), "acf".to_string(), "pacf".to_string()];
    let rows: Vec<Vec<String>> = (0..lags)
        .map(|lag| {
            vec![
                lag.to_string(),
                coefficient(diagnostics.acf.get(lag).copied().flatten(), band),
                coefficient(diagnostics.pacf.get(lag).copied().flatten(), band),
            ]
        })
        .collect();

    let header = match (diagnostics.series_length, band) {
        (Some(n), Some(b)) => format!("{} observations, 95% band ±{:.3}", n, b),
        _ => "Series length unknown, no significance band".to_string(),
    };
    format!("{}\n{}", header, render_table(&columns, &rows))
}

pub async fn diagnostics(client: &ForecastClient, query: &DiagnosticsQuery) -> Result<String> {
    trace!("Entering diagnostics function");

    let diagnostics = client.diagnostics(query).await?;
    info!("Fetched {} autocorrelation lags", diagnostics.acf.len());

    Ok(render(&diagnostics))
}
