use std::io;

/// Errors that can occur during configuration engine operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The project file could not be checked out for editing")]
    EditNotAllowed,

    #[error("Configuration not found: {0}")]
    ConfigurationNotFound(String),

    #[error("Invalid configuration format: {0}")]
    InvalidConfigurationName(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Listener failed: {0}")]
    ListenerFailed(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for configuration engine operations
pub type Result<T> = std::result::Result<T, Error>;
