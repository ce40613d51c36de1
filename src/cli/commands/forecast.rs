use anyhow::{Context, Result};
use common::export::forecast_csv;
use common::{DisplayWindow, ForecastCharts, ForecastResult};
use tracing::{debug, error, info, trace};

use crate::cli::ForecastArgs;
use crate::client::ForecastClient;
use crate::output::{metrics_line, points_table};

/// Metrics, model badges and the windowed overlay/forecast tables.
pub fn render(result: &ForecastResult, window: &DisplayWindow) -> String {
    let charts = ForecastCharts::from_result(Some(result)).windowed(window);

    let mut model = vec![result.model_id.clone().unwrap_or_else(|| "model".to_string())];
    if let Some(order) = result.order {
        model.push(format!("order {}", order));
    }
    if let Some(seasonal) = result.seasonal_order {
        model.push(format!("seasonal {}", seasonal));
    }

    let mut out = vec![model.join("  "), metrics_line(result.metrics.as_ref()), String::new()];
    out.push(format!("Actual vs predicted ({} points)", charts.overlay.len()));
    out.push(points_table(&charts.overlay));
    out.push(String::new());
    out.push(format!("Forecast ({} points)", charts.forecast.len()));
    out.push(points_table(&charts.forecast));
    out.join("\n")
}

pub async fn forecast(client: &ForecastClient, args: &ForecastArgs) -> Result<String> {
    trace!("Entering forecast function");
    let request = args.request()?;
    debug!(?request, "Forecast request");
    info!("Fitting {} model at {} frequency", request.metric, request.freq);

    let result = match client.forecast(&request).await {
        Ok(result) => result,
        Err(e) => {
            error!("Forecast failed: {:#}", e);
            return Err(e);
        }
    };
    info!(
        "Forecast received: {} history, {} validation, {} forecast points",
        result.history.len(),
        result.validation.len(),
        result.forecast.len()
    );

    let window = DisplayWindow::new(args.window_percent, args.stride);
    let mut report = render(&result, &window);

    if let Some(path) = &args.export {
        let csv = forecast_csv(&result.forecast)?;
        tokio::fs::write(path, csv)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Exported {} forecast rows to {}", result.forecast.len(), path.display());
        report.push_str(&format!("\n\nWrote {}", path.display()));
    }

    Ok(report)
}
