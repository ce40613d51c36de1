pub mod clean;
pub mod diagnostics;
pub mod forecast;
pub mod health;
pub mod ingest;
pub mod raw;
pub mod series;
pub mod upload;

pub use clean::clean;
pub use diagnostics::diagnostics;
pub use forecast::forecast;
pub use health::health;
pub use ingest::ingest;
pub use raw::raw;
pub use series::series;
pub use upload::upload;
