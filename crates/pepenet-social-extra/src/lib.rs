//! # Pepenet Social Extra
//!
//! The tagged field store behind a transaction's `tx_extra`.
//!
//! ## Overview
//!
//! Social features are embedded into a transaction as `(tag, payload)`
//! fields. This crate abstracts the host transaction behind the
//! [`ExtraFields`] trait and provides [`TxExtra`], an in-memory ordered
//! implementation with a byte-stream encoding.
//!
//! ## Usage
//!
//! ```rust
//! use pepenet_social_extra::{ExtraFields, TxExtra};
//!
//! let mut extra = TxExtra::new();
//! extra.add_field(0x00, b"payload");
//! assert_eq!(extra.find_field(0x00).unwrap(), b"payload");
//!
//! let bytes = extra.to_bytes();
//! assert_eq!(TxExtra::parse(&bytes).unwrap(), extra);
//! ```
//!
//! ## Design Notes
//!
//! - **Append-only**: fields are only added, except explicit removal by tag
//! - **No uniqueness**: duplicate tags are stored; callers decide policy
//! - **Distinct misses**: an empty extension and a missing tag are different
//!   [`LookupError`]s

pub mod error;
pub mod traits;
pub mod tx_extra;

pub use error::{ExtraError, LookupError, Result};
pub use traits::{ExtraField, ExtraFields, ExtraFieldsExt};
pub use tx_extra::{TxExtra, MAX_FIELD_LEN};
