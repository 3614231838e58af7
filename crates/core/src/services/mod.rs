//! Service implementations for the engine's host interfaces

pub mod document_evaluator;
pub mod os_file_system;
pub mod project_editors;

pub use document_evaluator::{DocumentEvaluator, NullEvaluator};
pub use os_file_system::OsFileSystem;
pub use project_editors::{AlwaysEditable, FileProjectEditor};
