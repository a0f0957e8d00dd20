//! Error types for social features.

use pepenet_social_args::ArgsError;
use pepenet_social_core::{CoreError, SocialFeatureKind};
use thiserror::Error;

/// Why a feature failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Validation ran before the feature was derived or decoded.
    #[error("feature is not loaded")]
    NotLoaded,

    #[error("msg must not be empty")]
    EmptyMessage,

    /// The compressed message exceeds the kind's limit.
    #[error("compressed msg is {size} bytes, {kind} limit is {max}")]
    MessageTooLarge {
        kind: SocialFeatureKind,
        size: usize,
        max: usize,
    },

    /// An optional field is out of bounds, or a title is missing/misplaced.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A public key is embedded without a signature.
    #[error("public key present without a signature")]
    MissingSignature,

    /// A signature is present but no key is available to check it.
    #[error("signature present without a public key to verify it")]
    MissingPublicKey,

    /// The supplied verification key differs from the embedded or signer key.
    #[error("verification key does not match the feature's own key")]
    KeyMismatch,

    #[error("signature verification failed")]
    InvalidSignature,

    /// Compressing `msg` for the size check failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Errors that can occur while deriving, encoding, or embedding features.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocialError {
    /// Operation requires a derived or decoded feature.
    #[error("feature is not loaded")]
    NotLoaded,

    /// Operation requires a validated feature.
    #[error("feature has not been validated")]
    NotValidated,

    /// The binary form could not be decoded.
    #[error("malformed feature encoding: {0}")]
    Decode(String),

    #[error("json encoding failed: {0}")]
    Json(String),

    /// The embedded payload could not be decompressed.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// More than one social feature field in one transaction.
    #[error("duplicate social feature fields: {0} present, at most 1 allowed")]
    DuplicateFeature(usize),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("argument error: {0}")]
    Args(#[from] ArgsError),
}

/// Result type for social feature operations.
pub type Result<T> = std::result::Result<T, SocialError>;
