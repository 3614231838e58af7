pub mod event_sinks;
pub mod paths;

pub use event_sinks::{Cookie, EventSinks};
pub use paths::{absolute_file_path, normalize_directory_path, normalize_path};
