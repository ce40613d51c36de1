pub mod charts;
pub mod config_form;
pub mod diagnostics;
pub mod stats;
pub mod traces;
pub mod view;
pub mod window_controls;

pub use view::Modeling;
