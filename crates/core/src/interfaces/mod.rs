//! Core interfaces for the configuration engine
//!
//! The engine talks to the outside world only through these traits: the
//! build engine, the editor gate, the file system and change observers.

pub mod build_evaluator;
pub mod capabilities;
pub mod file_system;
pub mod listeners;
pub mod project_editor;

pub use build_evaluator::{BuildContext, BuildEvaluator, TargetEvaluation};
pub use capabilities::{BuildableConfiguration, ConfigurationEditor, ConfigurationQuery};
pub use file_system::FileSystem;
pub use listeners::{
    BuildStatusCallback, ConfigurationEvents, PropertyChangeListener, PropertyChanged,
};
pub use project_editor::ProjectEditor;
