//! Unified error types for the crate using `thiserror`.

use thiserror::Error;

/// Main error type for kinship operations
#[derive(Error, Debug)]
pub enum KinshipError {
    /// An identifier segment or character is not a valid non-negative integer
    #[error("invalid identifier '{identifier}': segment '{segment}' at position {position} is not a non-negative integer")]
    Parse {
        identifier: String,
        segment: String,
        position: usize,
    },

    /// An operation requiring at least one generation element received an empty path
    #[error("identifier '{identifier}' has an empty generation path")]
    EmptyPath { identifier: String },

    /// Configuration errors (invalid format names, unparseable spouse links)
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Unknown report format
    #[error("unsupported report format: {format}")]
    Format { format: String },

    /// I/O errors (file missing, permission denied, read/write failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using KinshipError
pub type Result<T> = std::result::Result<T, KinshipError>;

impl KinshipError {
    /// Create a parse error for one offending segment
    pub fn parse(
        identifier: impl Into<String>,
        segment: impl Into<String>,
        position: usize,
    ) -> Self {
        Self::Parse {
            identifier: identifier.into(),
            segment: segment.into(),
            position,
        }
    }

    /// Create an empty-path error
    pub fn empty_path(identifier: impl Into<String>) -> Self {
        Self::EmptyPath {
            identifier: identifier.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unsupported-format error
    pub fn format(format: impl Into<String>) -> Self {
        Self::Format {
            format: format.into(),
        }
    }
}
