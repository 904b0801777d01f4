//! Error type shared by all configuration operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, querying, or serializing a
/// [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred while reading or writing a config file.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The buffer is not valid JSON.
    #[error("failed to parse config JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document parsed, but its top level is not a JSON object.
    #[error("config document root must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// The requested key is not present in the container.
    #[error("no such key: {0}")]
    NoSuchKey(String),

    /// The stored value's dynamic type is incompatible with the requested type.
    #[error("type mismatch for key {key:?}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The container holds a value that cannot be represented as JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}
