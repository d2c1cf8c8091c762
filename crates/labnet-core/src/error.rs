//! Error types for labnet.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level result type for labnet operations.
pub type Result<T> = std::result::Result<T, LabnetError>;

/// Top-level error type for labnet.
///
/// Store mutations themselves are total and never produce one of these;
/// errors only come from the edges (storage, configuration, I/O).
#[derive(Debug, Error)]
pub enum LabnetError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by durable key-value backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(
        "data directory {} is not initialized. Run `labnet init` first.",
        .0.display()
    )]
    NotInitialized(PathBuf),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("durable storage is not available")]
    Unavailable,

    #[error("io error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for LabnetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
