//! # Pepenet Social
//!
//! Peps and posts: short social messages carried inside transactions.
//!
//! ## Overview
//!
//! A feature is derived from parsed arguments, optionally signed with a key
//! derived from seed material, encoded as a protobuf message, compressed,
//! and appended to the transaction's `tx_extra`. The inverse path
//! extracts, decompresses, decodes, and validates it, so malformed or
//! tampered transactions are rejected the same way on every node.
//!
//! ## Key Concepts
//!
//! - **Pep**: a short, optionally signed, optionally pseudonymous message
//! - **Post**: a titled pep with a larger size allowance
//! - **Signing message**: fixed-order concatenation of the feature's fields
//! - **One per transaction**: two social fields make a transaction invalid
//!
//! ## Usage
//!
//! ```rust
//! use pepenet_social::{embed, extract_and_verify, SocialArgs, SocialFeature};
//! use pepenet_social::core::SocialFeatureKind;
//! use pepenet_social::extra::TxExtra;
//!
//! let raw = r#"{"pep_args": {"msg": "pepe has a good day", "sk_seed": "123456", "post_pk": true}}"#;
//! let args = SocialArgs::from_json(SocialFeatureKind::Pep, raw).unwrap();
//! let feature = SocialFeature::derive_from(&args).unwrap();
//!
//! let mut extra = TxExtra::new();
//! embed(&feature, &mut extra).unwrap();
//!
//! let extracted = extract_and_verify(&extra, None).unwrap().unwrap();
//! assert_eq!(extracted.msg(), "pepe has a good day");
//! ```
//!
//! ## Re-exports
//!
//! - `pepenet_social::core` - keys, codec, compression, limits
//! - `pepenet_social::extra` - the `tx_extra` field store
//! - `pepenet_social::args` - JSON argument parsing

pub mod canonical;
pub mod embed;
pub mod error;
pub mod feature;
pub mod wire;

// Re-export component crates
pub use pepenet_social_args as args;
pub use pepenet_social_core as core;
pub use pepenet_social_extra as extra;

pub use canonical::signing_message;
pub use embed::{
    check_transaction_validity, check_tx_extra_bytes, embed, extract_and_verify,
    social_field_count,
};
pub use error::{Result, SocialError, ValidationError};
pub use feature::{KeySource, SignatureCheck, SocialFeature};
pub use wire::FeatureProto;

pub use pepenet_social_args::{SocialArgs, SocialArgsBuilder};
pub use pepenet_social_core::{Ed25519PublicKey, Keypair, SocialFeatureKind, TxHash};
pub use pepenet_social_extra::{ExtraFields, TxExtra};
