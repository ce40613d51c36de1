pub mod clean;
pub mod raw;
pub mod table;

pub use clean::CleanData;
pub use raw::RawData;
