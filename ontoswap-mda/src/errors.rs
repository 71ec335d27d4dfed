//! Error types for building, validating and loading the precomputed artifact.

use thiserror::Error;

/// Errors that can occur while producing or consuming an [`Mda`](crate::Mda).
#[derive(Debug, Error)]
pub enum MdaError {
    /// A configuration value is out of range.
    #[error("invalid configuration for `{field}`: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// The fact source (or a loaded artifact) contains no entities.
    #[error("ontology has no entities")]
    EmptyOntology,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ron decode error: {0}")]
    RonDecode(#[from] ron::error::SpannedError),

    #[error("ron encode error: {0}")]
    RonEncode(#[from] ron::Error),

    /// Reading or writing an artifact file failed.
    #[error("failed to access artifact: {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for artifact operations.
pub type MdaResult<T> = Result<T, MdaError>;
