pub mod auth;
pub mod charts;
pub mod data;
pub mod layout;
pub mod modeling;
pub mod settings;
pub mod upload;
