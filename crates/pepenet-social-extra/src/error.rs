//! Error types for the tx_extra store.

use thiserror::Error;

/// Errors that can occur while parsing a `tx_extra` byte stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtraError {
    /// The stream ended inside a field header or payload.
    #[error("truncated tx_extra field at offset {offset}: {reason}")]
    Truncated { offset: usize, reason: String },

    /// A field declared a payload longer than allowed.
    #[error("tx_extra field at offset {offset} declares {len} bytes, max is {max}")]
    Oversized { offset: usize, len: u64, max: usize },
}

/// Why a lookup by tag found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The extension carries no fields at all.
    #[error("tx_extra is empty")]
    Empty,

    /// Fields exist, but none with this tag.
    #[error("no tx_extra field with tag {tag:#04x} ({other_fields} other fields present)")]
    TagNotFound { tag: u8, other_fields: usize },
}

/// Result type for tx_extra operations.
pub type Result<T> = std::result::Result<T, ExtraError>;
