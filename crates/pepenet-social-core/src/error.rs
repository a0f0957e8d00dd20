//! Error types for the pepenet social core primitives.

use thiserror::Error;

/// Errors raised by the primitive adapters and the fixed-size codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("compression failed: {0}")]
    Compression(String),

    #[error("decompression failed: {0}")]
    Decompression(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid hex for {what}: {reason}")]
    InvalidHex { what: &'static str, reason: String },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
