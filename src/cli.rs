use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use common::{DiagnosticsQuery, ForecastRequest, Frequency, Metric, ModelOrder, SeasonalOrder};

pub mod commands;

use crate::client::ForecastClient;
use crate::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use commands::{clean, diagnostics, forecast, health, ingest, raw, series, upload};

#[derive(Parser)]
#[command(name = "evdash")]
#[command(about = "EV charging demand dashboard for the terminal")]
#[command(version)]
pub struct Cli {
    /// Base URL of the forecast service
    #[arg(short, long, global = true, env = "EVDASH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(short, long, global = true, env = "EVDASH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Site and bucket size shared by the aggregated views.
#[derive(Args, Debug, Clone)]
pub struct Scope {
    /// Restrict to one site; all sites when omitted
    #[arg(short, long)]
    pub site: Option<String>,

    /// Aggregation frequency: H (hourly) or D (daily)
    #[arg(short, long, default_value = "H")]
    pub freq: Frequency,
}

#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub scope: Scope,

    /// Quantity to forecast: energy or sessions
    #[arg(short, long, default_value = "energy")]
    pub metric: Metric,

    #[arg(long, default_value_t = 24)]
    pub seasonal_period: u32,

    /// Steps to forecast past the end of the series
    #[arg(long, default_value_t = 48)]
    pub horizon: u32,

    /// Trailing steps held out for validation
    #[arg(long, default_value_t = 48)]
    pub test_size: u32,

    /// Use the given orders instead of the automatic search
    #[arg(long)]
    pub no_auto_grid: bool,

    /// Non-seasonal order as p,d,q
    #[arg(long, value_delimiter = ',')]
    pub order: Option<Vec<u32>>,

    /// Seasonal order as P,D,Q,s
    #[arg(long, value_delimiter = ',')]
    pub seasonal_order: Option<Vec<u32>>,

    /// Share of each series to print, counted from its end
    #[arg(long, default_value_t = 100.0)]
    pub window_percent: f64,

    /// Print every n-th point of the window
    #[arg(long)]
    pub stride: Option<usize>,

    /// Write the forecast rows to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl ForecastArgs {
    pub fn request(&self) -> Result<ForecastRequest> {
        let order = match self.order.as_deref() {
            None => None,
            Some(&[p, d, q]) => Some(ModelOrder(p, d, q)),
            Some(other) => bail!("--order takes p,d,q, got {} values", other.len()),
        };
        let seasonal_order = match self.seasonal_order.as_deref() {
            None => None,
            Some(&[p, d, q, s]) => Some(SeasonalOrder(p, d, q, s)),
            Some(other) => bail!("--seasonal-order takes P,D,Q,s, got {} values", other.len()),
        };
        Ok(ForecastRequest {
            site: self.scope.site.clone(),
            metric: self.metric,
            freq: self.scope.freq,
            seasonal_period: self.seasonal_period,
            horizon: self.horizon,
            test_size: self.test_size,
            auto_grid: !self.no_auto_grid,
            order,
            seasonal_order,
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the forecast service is reachable
    Health,
    /// Upload a CSV of charging sessions
    Upload {
        /// Path to the CSV file
        csv_path: PathBuf,
    },
    /// Ingest an ACN JSON dump ({"_meta": ..., "_items": [...]})
    Ingest {
        /// Path to the JSON file
        json_path: PathBuf,

        /// Keep the complete records of a truncated dump
        #[arg(long)]
        recover: bool,
    },
    /// Preview the uploaded data
    Raw {
        /// Show the forward-filled variant
        #[arg(long)]
        filled: bool,

        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Preview the cleaned data with its missing-value counts
    Clean {
        #[command(flatten)]
        scope: Scope,

        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Print the aggregated energy and session series
    Series {
        #[command(flatten)]
        scope: Scope,
    },
    /// Autocorrelation diagnostics of the aggregated series
    Diagnostics {
        #[command(flatten)]
        scope: Scope,

        #[arg(short, long, default_value = "energy")]
        metric: Metric,

        #[arg(short, long, default_value_t = 40)]
        nlags: u32,
    },
    /// Fit a model and print accuracy, validation overlay and forecast
    Forecast(ForecastArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = ClientConfig::new(&self.api_url, self.timeout)?;
        let client = ForecastClient::new(config)?;

        let report = match self.command {
            Commands::Health => health(&client).await?,
            Commands::Upload { csv_path } => upload(&client, &csv_path).await?,
            Commands::Ingest { json_path, recover } => ingest(&client, &json_path, recover).await?,
            Commands::Raw { filled, limit } => raw(&client, filled, limit).await?,
            Commands::Clean { scope, limit } => clean(&client, &scope, limit).await?,
            Commands::Series { scope } => series(&client, &scope).await?,
            Commands::Diagnostics { scope, metric, nlags } => {
                let query = DiagnosticsQuery {
                    metric,
                    freq: scope.freq,
                    site: scope.site,
                    nlags,
                };
                diagnostics(&client, &query).await?
            }
            Commands::Forecast(args) => forecast(&client, &args).await?,
        };

        println!("{}", report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_flags_build_request() {
        let cli = Cli::try_parse_from([
            "evdash",
            "forecast",
            "--freq",
            "D",
            "--metric",
            "sessions",
            "--no-auto-grid",
            "--order",
            "2,1,0",
            "--seasonal-order",
            "1,0,1,7",
            "--window-percent",
            "25",
        ])
        .unwrap();

        let Commands::Forecast(args) = cli.command else {
            panic!("expected the forecast command");
        };
        let request = args.request().unwrap();

        assert_eq!(request.freq, Frequency::Daily);
        assert_eq!(request.metric, Metric::Sessions);
        assert!(!request.auto_grid);
        assert_eq!(request.order, Some(ModelOrder(2, 1, 0)));
        assert_eq!(request.seasonal_order, Some(SeasonalOrder(1, 0, 1, 7)));
        assert_eq!(args.window_percent, 25.0);
    }

    #[test]
    fn test_forecast_defaults_match_service_defaults() {
        let cli = Cli::try_parse_from(["evdash", "forecast"]).unwrap();
        let Commands::Forecast(args) = cli.command else {
            panic!("expected the forecast command");
        };

        assert_eq!(args.request().unwrap(), ForecastRequest::default());
        assert!(args.export.is_none());
    }

    #[test]
    fn test_order_needs_three_values() {
        let cli = Cli::try_parse_from(["evdash", "forecast", "--order", "1,1"]).unwrap();
        let Commands::Forecast(args) = cli.command else {
            panic!("expected the forecast command");
        };

        assert!(args.request().is_err());
    }

    #[test]
    fn test_invalid_frequency_is_rejected() {
        assert!(Cli::try_parse_from(["evdash", "series", "--freq", "W"]).is_err());
    }
}
