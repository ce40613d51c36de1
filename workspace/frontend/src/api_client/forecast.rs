use common::{Diagnostics, DiagnosticsQuery, ForecastRequest, ForecastResult};
use crate::api_client;

pub async fn run_forecast(request: ForecastRequest) -> Result<ForecastResult, String> {
    let body = request.prepared().map_err(|e| {
        log::warn!("Forecast request rejected before sending: {}", e);
        e.to_string()
    })?;

    log::trace!(
        "Requesting forecast: metric={} freq={} horizon={} test_size={} auto_grid={}",
        body.metric, body.freq, body.horizon, body.test_size, body.auto_grid
    );

    let result = api_client::post::<ForecastResult, _>("/forecast", &body).await;

    match &result {
        Ok(result) => log::info!(
            "Forecast received: model={:?} history={} validation={} forecast={}",
            result.model_id,
            result.history.len(),
            result.validation.len(),
            result.forecast.len()
        ),
        Err(e) => log::error!("Failed to run forecast: {}", e),
    }

    result
}

pub async fn get_diagnostics(query: DiagnosticsQuery) -> Result<Diagnostics, String> {
    let url = query.endpoint().map_err(|e| e.to_string())?;
    log::trace!("Fetching diagnostics: {}", url);

    let result = api_client::get::<Diagnostics>(&url).await;

    if let Err(ref e) = result {
        log::error!("Failed to fetch diagnostics: {}", e);
    } else {
        log::info!("Successfully fetched diagnostics for {}", query.metric);
    }

    result
}
