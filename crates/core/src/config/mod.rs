//! Engine settings and the configuration catalog

pub mod provider;
mod settings;

pub use provider::{ConfigurationSet, NewConfigProperty, OUTPUT_PATH, ProviderCapabilities};
pub use settings::{EngineSettings, OutputGroupSpec, SETTINGS_FILE_NAME};
