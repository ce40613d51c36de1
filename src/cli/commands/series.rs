use anyhow::Result;
use tracing::{info, trace};

use crate::cli::Scope;
use crate::client::ForecastClient;
use crate::output::{number, render_table};

pub async fn series(client: &ForecastClient, scope: &Scope) -> Result<String> {
    trace!("Entering series function");

    let aggregated = client.series(scope.site.as_deref(), scope.freq).await?;
    info!("Fetched {} aggregated points", aggregated.series.len());

    let columns = vec![
        "ts".to_string(),
        "energy_kwh".to_string(),
        "sessions".to_string(),
    ];
    let rows: Vec<Vec<String>> = aggregated
        .series
        .iter()
        .map(|p| {
            vec![
                p.ts.clone(),
                number(p.energy_kwh),
                p.sessions.map_or_else(|| "-".to_string(), |n| n.to_string()),
            ]
        })
        .collect();

    Ok(format!(
        "{} series for {}\n{}",
        aggregated.freq.unwrap_or(scope.freq).label(),
        aggregated
            .site
            .or_else(|| scope.site.clone())
            .unwrap_or_else(|| "all sites".to_string()),
        render_table(&columns, &rows)
    ))
}
