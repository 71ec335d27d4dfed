//! Error types for the fixture harness.

use thiserror::Error;

/// Errors that can occur while loading or running fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The fixture is not valid TOML or does not match the fixture schema.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The fixture file could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// The fixture parsed but describes something the harness cannot run.
    #[error("invalid fixture: {message}")]
    Invalid { message: String },

    /// The fixture vocabulary could not be turned into an ontology.
    #[error("failed to build ontology: {message}")]
    Build { message: String },
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;
