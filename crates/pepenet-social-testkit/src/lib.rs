//! # Pepenet Social Testkit
//!
//! Testing utilities for pepenet social features.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Argument vectors**: JSON inputs that must parse, and inputs that must not
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A deterministic signer and fully populated arguments
//!
//! ## Argument Vectors
//!
//! ```rust
//! use pepenet_social_args::SocialArgs;
//! use pepenet_social_testkit::vectors::{invalid_vectors, valid_vectors};
//!
//! for v in valid_vectors() {
//!     assert!(SocialArgs::from_json(v.kind, v.json).is_ok(), "{}", v.name);
//! }
//! for v in invalid_vectors() {
//!     assert!(SocialArgs::from_json(v.kind, v.json).is_err(), "{}", v.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use pepenet_social::SocialFeature;
//! use pepenet_social_testkit::generators::{args_from_params, ArgsParams};
//!
//! proptest! {
//!     #[test]
//!     fn derive_is_deterministic(params: ArgsParams) {
//!         let args = args_from_params(&params);
//!         let a = SocialFeature::derive_from(&args).unwrap();
//!         let b = SocialFeature::derive_from(&args).unwrap();
//!         prop_assert_eq!(a, b);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use pepenet_social_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let extra = fixture.embedded(&fixture.full_pep_args(true));
//! assert_eq!(extra.len(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{args_from_params, ArgsParams};
pub use vectors::{invalid_vectors, valid_vectors, ArgsVector};
