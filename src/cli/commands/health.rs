use anyhow::Result;
use tracing::{error, info, trace};

use crate::client::ForecastClient;

pub async fn health(client: &ForecastClient) -> Result<String> {
    trace!("Entering health function");
    info!("Checking forecast service at {}", client.base_url());

    match client.health().await {
        Ok(health) => {
            let status = health.status.unwrap_or_else(|| "ok".to_string());
            info!("Forecast service is {}", status);
            Ok(format!("{}: {}", client.base_url(), status))
        }
        Err(e) => {
            error!("Forecast service unavailable: {:#}", e);
            Err(e)
        }
    }
}
