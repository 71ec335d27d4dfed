//! Error types for the matching pipeline.

use ontoswap_mda::MdaError;
use thiserror::Error;

/// Errors raised while configuring or running the matchers.
///
/// "No match" is never an error: matchers return the stream unchanged.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A window passed the vocabulary filter but no entity resolves for it.
    #[error("no canonical entity for matched phrase `{phrase}`")]
    CanonNotFound { phrase: String },

    #[error("invalid configuration for `{field}`: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    #[error(transparent)]
    Mda(#[from] MdaError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for matching operations.
pub type MatchResult<T> = Result<T, MatchError>;
