//! projcfg-core - build configurations, output groups and up-to-date checks
//!
//! This crate provides functionality to:
//! - Add, clone, rename and delete named configurations of a project
//! - Evaluate per-configuration properties with cached, invalidate-on-write reads
//! - Compute output groups from a build evaluator and decide whether a rebuild is needed
pub mod cache;
pub mod config;
pub mod configuration;
pub mod error;
pub mod interfaces;
pub mod output;
pub mod project;
pub mod services;
pub mod staleness;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

pub use config::{ConfigurationSet, EngineSettings, NewConfigProperty};
pub use configuration::{BuildableProjectConfig, ProjectConfig};
pub use interfaces::{
    BuildContext, BuildEvaluator, BuildStatusCallback, BuildableConfiguration,
    ConfigurationEditor, ConfigurationEvents, ConfigurationQuery, FileSystem, ProjectEditor,
    PropertyChangeListener, PropertyChanged,
};
pub use output::{Output, OutputGroup};
pub use project::{Project, ProjectDocument, ProjectModel, PropertySnapshot};
pub use services::{DocumentEvaluator, FileProjectEditor, OsFileSystem};
pub use staleness::{GroupOutputs, StalenessChecker};
