//! Error types for needs-engine operations.
//!
//! This module provides a comprehensive error hierarchy using `thiserror` for
//! formula parsing/compilation, catalog construction, and user-profile
//! document handling.

use thiserror::Error;

/// Result type alias for needs-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for needs-engine operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Formula parsing or compilation errors.
    #[error("formula error: {0}")]
    Formula(#[from] FormulaError),

    /// User-profile document errors.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// A numeric field fell outside its required range.
    #[error("value out of range: {field} = {value}")]
    ValueOutOfRange {
        /// Name of the field that was out of range.
        field: String,
        /// The offending value, as supplied.
        value: f64,
    },

    /// Two records declared the same id within a scope that requires
    /// uniqueness.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// The kind of record (e.g. "feature", "need", "object").
        kind: String,
        /// The id that was declared more than once.
        id: String,
    },
}

/// Formula-specific errors for parsing and compiling CNF formulas.
#[derive(Error, Debug)]
pub enum FormulaError {
    /// The tokenizer or parser rejected the input at a given position.
    #[error("parse error at position {position}: {reason}")]
    Parse {
        /// Byte offset into the source text where parsing failed.
        position: usize,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// A literal referenced a feature id absent from the feature table.
    #[error("unknown feature: {id}")]
    UnknownFeature {
        /// The feature id that could not be resolved.
        id: String,
    },
}

/// Profile-specific errors for loading and replaying answer documents.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The serialized profile document could not be parsed.
    #[error("malformed profile document: {0}")]
    Malformed(String),

    /// An answer in the document referenced a need id unknown to the
    /// catalog it is being replayed against.
    #[error("answer references unknown need: {id}")]
    UnknownNeed {
        /// The need id referenced by the offending answer.
        id: String,
    },

    /// The document declared a field outside the documented shape and the
    /// designated extension area.
    #[error("schema error at {path}: {reason}")]
    Schema {
        /// Path (field name) where the schema violation was found.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Profile(ProfileError::Malformed(err.to_string()))
    }
}
