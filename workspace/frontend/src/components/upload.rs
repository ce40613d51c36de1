pub mod view;

pub use view::Upload;
