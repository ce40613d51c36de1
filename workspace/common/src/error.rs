use thiserror::Error;

/// Error types for the dashboard core
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Pasted or loaded input that is not a usable ingestion payload
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Forecast or diagnostics parameters outside their allowed ranges
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    /// Login attempt or session transition that is not allowed
    #[error("Session error: {0}")]
    Session(String),

    /// Failure while producing the CSV export
    #[error("Export error: {0}")]
    Export(String),
}

impl From<csv::Error> for DashboardError {
    fn from(error: csv::Error) -> Self {
        DashboardError::Export(error.to_string())
    }
}

/// Type alias for Result with DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
