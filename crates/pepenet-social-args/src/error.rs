//! Error types for argument parsing.

use thiserror::Error;

use crate::parser::ParseStage;

/// A document that does not match the argument schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation at '{pointer}' ({keyword}): {reason}")]
pub struct SchemaViolation {
    /// JSON pointer of the offending value ("" is the document root).
    pub pointer: String,
    /// The violated schema keyword, e.g. `maxLength`.
    pub keyword: &'static str,
    /// Human readable detail.
    pub reason: String,
}

impl SchemaViolation {
    pub(crate) fn new(pointer: impl Into<String>, keyword: &'static str, reason: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            keyword,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while turning user JSON into typed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    /// The input is not well-formed JSON.
    #[error("malformed json at line {line}, column {column}: {reason}")]
    Json {
        line: usize,
        column: usize,
        reason: String,
    },

    /// The document does not match the schema.
    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    /// An operation was called out of order.
    #[error("{operation} requires the parser to be {expected}, but it is {found}")]
    Stage {
        operation: &'static str,
        expected: ParseStage,
        found: ParseStage,
    },

    /// `sk_seed` and `post_pk` must be given together.
    #[error("{0}")]
    Coupling(String),

    /// A field value is out of bounds or unparsable.
    #[error("invalid {field}: {reason}")]
    Field { field: &'static str, reason: String },
}

impl From<serde_json::Error> for ArgsError {
    fn from(e: serde_json::Error) -> Self {
        ArgsError::Json {
            line: e.line(),
            column: e.column(),
            reason: e.to_string(),
        }
    }
}

/// Result type for argument parsing.
pub type Result<T> = std::result::Result<T, ArgsError>;
