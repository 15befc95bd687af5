//! Error types for manifest loading.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for manifest loading and validation.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Manifest file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// Two children share a name
    #[error("duplicate child name: {0}")]
    DuplicateName(String),

    /// No bounds in the manifest and none supplied
    #[error("stack bounds are required (set stack.bounds or pass them explicitly)")]
    MissingBounds,
}

impl ManifestError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
