use std::path::Path;

use anyhow::Result;
use tracing::{debug, error, info, trace};

use crate::client::ForecastClient;

pub async fn upload(client: &ForecastClient, csv_path: &Path) -> Result<String> {
    trace!("Entering upload function");
    info!("Uploading {}", csv_path.display());

    let receipt = match client.upload_csv(csv_path).await {
        Ok(receipt) => receipt,
        Err(e) => {
            error!("Upload of {} failed: {:#}", csv_path.display(), e);
            return Err(e);
        }
    };
    debug!(?receipt, "Upload accepted");

    let rows = receipt.rows.unwrap_or(0);
    info!("Uploaded {} rows", rows);
    Ok(format!(
        "Uploaded {} rows ({})",
        rows,
        receipt.format.as_deref().unwrap_or("csv")
    ))
}
