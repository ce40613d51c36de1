use anyhow::Result;
use tracing::{debug, info, trace};

use crate::cli::Scope;
use crate::client::ForecastClient;
use crate::output::render_table;

pub async fn clean(client: &ForecastClient, scope: &Scope, limit: u32) -> Result<String> {
    trace!("Entering clean function");
    debug!(?scope, limit, "Fetching cleaned preview");

    let cleaned = client
        .cleaned_preview(scope.site.as_deref(), scope.freq, limit)
        .await?;
    info!("Fetched {} cleaned rows", cleaned.preview.len());

    let mut out = Vec::new();
    if let Some(summary) = &cleaned.summary {
        out.push(summary.clone());
    }

    let null_columns = vec!["column".to_string(), "missing".to_string()];
    let null_rows: Vec<Vec<String>> = cleaned
        .null_counts_desc()
        .into_iter()
        .map(|(column, count)| vec![column, count.to_string()])
        .collect();
    out.push(render_table(&null_columns, &null_rows));
    out.push(String::new());

    let (columns, rows) = cleaned.table();
    out.push(render_table(&columns, &rows));
    Ok(out.join("\n"))
}
