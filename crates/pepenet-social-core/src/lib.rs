//! # Pepenet Social Core
//!
//! Pure primitives for pepenet social features: Ed25519 keys derived from
//! seed material, the fixed-size binary codec, payload compression, and the
//! per-kind size limits.
//!
//! This crate contains no I/O. Every function is a total function of its
//! inputs, returning [`CoreError`] on failure.
//!
//! ## Key Types
//!
//! - [`SocialFeatureKind`] - Pep or Post, with its `tx_extra` tag and limits
//! - [`Keypair`] - Signing keypair derived from an `sk_seed`
//! - [`TxHash`], [`Ed25519PublicKey`], [`Ed25519Signature`] - fixed-size values
//! - [`FixedBytes`] - exact-length encode/decode for the above

pub mod codec;
pub mod compression;
pub mod crypto;
pub mod error;
pub mod kind;
pub mod types;

pub use codec::FixedBytes;
pub use compression::{compress, compressed_len, decompress, COMPRESSION_LEVEL, MAX_DECOMPRESSED_SIZE};
pub use crypto::{verify_message, Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::{CoreError, Result};
pub use kind::{
    limits, FeatureLimits, SocialFeatureKind, PEP_SOCIAL_FEATURE_TAG, POST_SOCIAL_FEATURE_TAG,
};
pub use types::TxHash;
