//! Error types for table loading and generation.

use srg_mappings::MappingError;
use thiserror::Error;

/// Errors that can occur while loading sources or writing outputs.
#[derive(Debug, Error)]
pub enum GenError {
    /// A table line could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A source file exists but could not be read.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// A source is not configured or not present; pairings needing it are skipped.
    #[error("source unavailable: {source_name}: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// The configuration file could not be read or is invalid.
    #[error("invalid configuration {path}: {message}")]
    Config { path: String, message: String },

    /// The requested version is not in the configured allowlist.
    #[error("unknown version: {version}")]
    UnknownVersion { version: String },

    /// An output file could not be written.
    #[error("failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl GenError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, GenError::SourceUnavailable { .. })
    }
}

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;
