//! # Pepenet Social Args
//!
//! Turns user-supplied JSON into typed [`SocialArgs`].
//!
//! ## Overview
//!
//! Arguments arrive as a JSON object with a single wrapper key, `pep_args`
//! or `post_args`. Parsing runs in stages, each of which must succeed before
//! the next may run:
//!
//! 1. **load_json**: parse the raw text
//! 2. **validate_against_schema**: structural check against the kind's [`Schema`]
//! 3. **load_args_from_json**: extract typed fields, enforce `sk_seed` / `post_pk` coupling
//! 4. **validate**: character-length bounds
//!
//! ## Usage
//!
//! ```rust
//! use pepenet_social_args::SocialArgs;
//! use pepenet_social_core::SocialFeatureKind;
//!
//! let raw = r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1"}}"#;
//! let args = SocialArgs::from_json(SocialFeatureKind::Pep, raw).unwrap();
//! assert_eq!(args.pseudonym(), Some("pepe1"));
//! ```

pub mod args;
pub mod error;
pub mod parser;
pub mod schema;

pub use args::{SigningArgs, SocialArgs, SocialArgsBuilder};
pub use error::{ArgsError, Result, SchemaViolation};
pub use parser::{ArgsParser, ParseStage};
pub use schema::{Property, PropertyType, Schema, JSON_SCHEMA_DIALECT};
