//! In-memory implementation of the ExtraFields trait.
//!
//! Also owns the byte-stream form of a transaction extension:
//! each field is `tag:u8 || varint(len) || payload`, back to back.

use bytes::Bytes;
use prost::encoding::{decode_varint, encode_varint};
use tracing::debug;

use crate::error::{ExtraError, LookupError, Result};
use crate::traits::{ExtraField, ExtraFields};

/// Largest payload accepted when parsing a byte stream (1 MiB).
pub const MAX_FIELD_LEN: usize = 1 << 20;

/// A transaction extension held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxExtra {
    fields: Vec<ExtraField>,
}

impl TxExtra {
    /// Create an empty extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an extension byte stream.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut fields = Vec::new();
        let mut buf = bytes;

        while let Some((&tag, rest)) = buf.split_first() {
            let offset = bytes.len() - buf.len();
            buf = rest;

            let len = decode_varint(&mut buf).map_err(|e| ExtraError::Truncated {
                offset,
                reason: e.to_string(),
            })?;
            if len > MAX_FIELD_LEN as u64 {
                return Err(ExtraError::Oversized {
                    offset,
                    len,
                    max: MAX_FIELD_LEN,
                });
            }

            let len = len as usize;
            if buf.len() < len {
                return Err(ExtraError::Truncated {
                    offset,
                    reason: format!("payload needs {} bytes, {} left", len, buf.len()),
                });
            }
            let (payload, rest) = buf.split_at(len);
            fields.push(ExtraField::new(tag, Bytes::copy_from_slice(payload)));
            buf = rest;
        }

        Ok(Self { fields })
    }

    /// Encode to the extension byte stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for field in &self.fields {
            out.push(field.tag);
            encode_varint(field.payload.len() as u64, &mut out);
            out.extend_from_slice(&field.payload);
        }
        out
    }

    /// Iterate over fields in order.
    pub fn iter(&self) -> impl Iterator<Item = &ExtraField> {
        self.fields.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<ExtraField> for TxExtra {
    fn from_iter<I: IntoIterator<Item = ExtraField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl ExtraFields for TxExtra {
    fn add_field(&mut self, tag: u8, payload: &[u8]) {
        self.fields
            .push(ExtraField::new(tag, Bytes::copy_from_slice(payload)));
    }

    fn find_field(&self, tag: u8) -> std::result::Result<&[u8], LookupError> {
        if self.fields.is_empty() {
            return Err(LookupError::Empty);
        }
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.payload.as_ref())
            .ok_or(LookupError::TagNotFound {
                tag,
                other_fields: self.fields.len(),
            })
    }

    fn count_fields(&self, predicate: &dyn Fn(u8, &[u8]) -> bool) -> usize {
        self.fields
            .iter()
            .filter(|f| predicate(f.tag, &f.payload))
            .count()
    }

    fn remove_fields(&mut self, tag: u8) -> usize {
        let before = self.fields.len();
        self.fields.retain(|f| f.tag != tag);
        let removed = before - self.fields.len();
        if removed > 0 {
            debug!(tag, removed, "removed tx_extra fields");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ExtraFieldsExt;
    use proptest::prelude::*;

    #[test]
    fn test_add_and_find() {
        let mut extra = TxExtra::new();
        extra.add_field(0x02, b"nonce");
        extra.add_field(0x00, b"first");
        extra.add_field(0x00, b"second");

        assert_eq!(extra.find_field(0x00).unwrap(), b"first");
        assert_eq!(extra.find_field(0x02).unwrap(), b"nonce");
        assert_eq!(extra.len(), 3);
        assert_eq!(extra.count_tag(0x00), 2);
    }

    #[test]
    fn test_lookup_errors_are_distinct() {
        let mut extra = TxExtra::new();
        assert_eq!(extra.find_field(0x00), Err(LookupError::Empty));

        extra.add_field(0x02, b"nonce");
        assert_eq!(
            extra.find_field(0x00),
            Err(LookupError::TagNotFound {
                tag: 0x00,
                other_fields: 1
            })
        );
        assert!(!extra.has_field(0x00));
    }

    #[test]
    fn test_count_with_predicate() {
        let mut extra = TxExtra::new();
        extra.add_field(0x00, b"a");
        extra.add_field(0x01, b"bb");
        extra.add_field(0x05, b"ccc");

        assert_eq!(extra.count_fields(&|tag, _| tag <= 0x01), 2);
        assert_eq!(extra.count_fields(&|_, payload| payload.len() > 1), 2);
    }

    #[test]
    fn test_remove_fields() {
        let mut extra = TxExtra::new();
        extra.add_field(0x00, b"a");
        extra.add_field(0x05, b"b");
        extra.add_field(0x00, b"c");

        assert_eq!(extra.remove_fields(0x00), 2);
        assert_eq!(extra.remove_fields(0x00), 0);
        assert_eq!(extra.len(), 1);
        assert_eq!(extra.find_field(0x05).unwrap(), b"b");
    }

    #[test]
    fn test_empty_payload_is_kept() {
        let mut extra = TxExtra::new();
        extra.add_field(0x00, b"");
        assert_eq!(extra.find_field(0x00).unwrap(), b"");
        assert_eq!(TxExtra::parse(&extra.to_bytes()).unwrap(), extra);
    }

    #[test]
    fn test_stream_layout() {
        let mut extra = TxExtra::new();
        extra.add_field(0x01, &[0xaa; 200]);
        let bytes = extra.to_bytes();
        // tag, varint(200) = [0xc8, 0x01], payload
        assert_eq!(&bytes[..3], &[0x01, 0xc8, 0x01]);
        assert_eq!(bytes.len(), 3 + 200);
    }

    #[test]
    fn test_parse_truncated() {
        assert!(matches!(
            TxExtra::parse(&[0x00]),
            Err(ExtraError::Truncated { offset: 0, .. })
        ));
        assert!(matches!(
            TxExtra::parse(&[0x00, 0x01, 0xaa, 0x01, 0x05, 0x01]),
            Err(ExtraError::Truncated { offset: 3, .. })
        ));
    }

    #[test]
    fn test_parse_oversized() {
        let mut bytes = vec![0x00];
        encode_varint(MAX_FIELD_LEN as u64 + 1, &mut bytes);
        assert!(matches!(
            TxExtra::parse(&bytes),
            Err(ExtraError::Oversized { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_stream_roundtrip(fields in prop::collection::vec((any::<u8>(), prop::collection::vec(any::<u8>(), 0..300)), 0..8)) {
            let extra: TxExtra = fields
                .iter()
                .map(|(tag, payload)| ExtraField::new(*tag, payload.clone()))
                .collect();
            let parsed = TxExtra::parse(&extra.to_bytes()).unwrap();
            prop_assert_eq!(parsed, extra);
        }
    }
}
