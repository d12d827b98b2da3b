//! Error types for the mapping algebra.
//!
//! None of the combinators fail. These values come from descriptor parsing,
//! package validation and inversion diagnostics.

use crate::symbol::SymbolKind;
use thiserror::Error;

/// Errors raised while building or inspecting mappings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A type or method descriptor could not be parsed.
    #[error("malformed descriptor `{descriptor}`: {message}")]
    MalformedDescriptor { descriptor: String, message: String },

    /// Two originals rename to the same symbol, so the inverse keeps only one.
    #[error("ambiguous inverse for {kind} `{renamed}`: `{first}` replaced by `{second}`")]
    AmbiguousInverse {
        kind: SymbolKind,
        renamed: String,
        first: String,
        second: String,
    },

    /// A package name that is not a sequence of Java identifiers.
    #[error("invalid package: `{name}`")]
    InvalidPackage { name: String },
}

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;
