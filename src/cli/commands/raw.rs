use anyhow::Result;
use tracing::{debug, info, trace};

use crate::client::ForecastClient;
use crate::output::render_table;

pub async fn raw(client: &ForecastClient, filled: bool, limit: u32) -> Result<String> {
    trace!("Entering raw function");
    debug!(filled, limit, "Fetching preview");

    let (preview, message) = client.raw_preview(filled, limit).await?;
    let (columns, rows) = preview.table();
    info!("Fetched {} preview rows", rows.len());

    let mut out = Vec::new();
    out.push(format!(
        "{} preview: {} rows total, {} columns{}",
        if filled { "Forward-filled" } else { "Raw" },
        preview.total_rows.map_or_else(|| "?".to_string(), |n| n.to_string()),
        columns.len(),
        preview.source.map(|s| format!(", source {}", s)).unwrap_or_default()
    ));
    if let Some(message) = message {
        out.push(message);
    }
    out.push(render_table(&columns, &rows));
    Ok(out.join("\n"))
}
