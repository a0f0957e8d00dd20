//! ExtraFields trait: the host's read/write primitives on `tx_extra`.
//!
//! Social features only ever touch a transaction's extension through this
//! trait, so a node can plug in its own transaction type. [`TxExtra`] is the
//! in-memory implementation.
//!
//! [`TxExtra`]: crate::TxExtra

use bytes::Bytes;

use crate::error::LookupError;

/// A single `(tag, payload)` entry of a transaction extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraField {
    /// Field type.
    pub tag: u8,
    /// Opaque payload.
    pub payload: Bytes,
}

impl ExtraField {
    /// Create a field.
    pub fn new(tag: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            tag,
            payload: payload.into(),
        }
    }
}

/// Ordered, append-only sequence of tagged fields.
///
/// # Design Notes
///
/// - **No uniqueness**: the store accepts any number of fields per tag.
///   Rules like "one social feature per transaction" belong to the caller.
/// - **Order is preserved**: lookups return the first match.
pub trait ExtraFields {
    /// Append a field. Always succeeds.
    fn add_field(&mut self, tag: u8, payload: &[u8]);

    /// Payload of the first field with `tag`.
    fn find_field(&self, tag: u8) -> Result<&[u8], LookupError>;

    /// Number of fields matching `predicate(tag, payload)`.
    fn count_fields(&self, predicate: &dyn Fn(u8, &[u8]) -> bool) -> usize;

    /// Remove every field with `tag`, returning how many were removed.
    fn remove_fields(&mut self, tag: u8) -> usize;
}

/// Extension trait for common lookups.
pub trait ExtraFieldsExt: ExtraFields {
    /// Number of fields with exactly this tag.
    fn count_tag(&self, tag: u8) -> usize {
        self.count_fields(&|t, _| t == tag)
    }

    /// Whether any field has this tag.
    fn has_field(&self, tag: u8) -> bool {
        self.find_field(tag).is_ok()
    }
}

impl<E: ExtraFields + ?Sized> ExtraFieldsExt for E {}
