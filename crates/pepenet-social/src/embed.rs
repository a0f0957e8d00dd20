//! Putting features into transactions and getting them back out.
//!
//! A transaction carries at most one social feature: a `tx_extra` field
//! tagged with the feature's kind whose payload is the compressed binary
//! form. Anything else in `tx_extra` is ignored.

use pepenet_social_core::{compress, decompress, Ed25519PublicKey, SocialFeatureKind};
use pepenet_social_extra::{ExtraFields, TxExtra};
use tracing::{debug, warn};

use crate::error::{Result, SocialError};
use crate::feature::SocialFeature;

/// Number of social feature fields (of any kind) in an extension.
pub fn social_field_count<E: ExtraFields + ?Sized>(extra: &E) -> usize {
    extra.count_fields(&|tag, _| SocialFeatureKind::is_social_tag(tag))
}

/// Validate, encode, compress, and append a feature.
///
/// Refuses to write a second social feature into the same extension.
pub fn embed<E: ExtraFields + ?Sized>(feature: &SocialFeature, extra: &mut E) -> Result<()> {
    let existing = social_field_count(extra);
    if existing > 0 {
        return Err(SocialError::DuplicateFeature(existing + 1));
    }

    let mut feature = feature.clone();
    feature.validate(None)?;
    let bytes = feature.dump_to_binary()?;
    let compressed = compress(&bytes)?;

    extra.add_field(feature.kind().tag(), &compressed);
    debug!(
        kind = %feature.kind(),
        encoded = bytes.len(),
        compressed = compressed.len(),
        "embedded social feature"
    );
    Ok(())
}

/// Find, decompress, decode, and validate the social feature of a
/// transaction.
///
/// Returns `Ok(None)` when there is none. `external` verifies a signature
/// whose key is not embedded; it is ignored when the feature carries a key.
pub fn extract_and_verify<E: ExtraFields + ?Sized>(
    extra: &E,
    external: Option<&Ed25519PublicKey>,
) -> Result<Option<SocialFeature>> {
    let count = social_field_count(extra);
    if count > 1 {
        return Err(SocialError::DuplicateFeature(count));
    }

    let Some((kind, payload)) = SocialFeatureKind::ALL
        .into_iter()
        .find_map(|kind| extra.find_field(kind.tag()).ok().map(|p| (kind, p)))
    else {
        return Ok(None);
    };

    let bytes = decompress(payload).map_err(|e| SocialError::Decompression(e.to_string()))?;
    let mut feature = SocialFeature::decode(kind, &bytes)?;
    let key = if feature.public_key().is_some() {
        None
    } else {
        external
    };
    let check = feature.validate(key)?;

    debug!(%kind, compressed = payload.len(), ?check, "extracted social feature");
    Ok(Some(feature))
}

/// Whether a transaction's social content is acceptable.
///
/// No social feature is valid. Exactly one that extracts and validates is
/// valid. Everything else is not, including a signature whose key is not
/// embedded, since no verification key is supplied here.
pub fn check_transaction_validity<E: ExtraFields + ?Sized>(extra: &E) -> bool {
    match extract_and_verify(extra, None) {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "rejecting transaction social feature");
            false
        }
    }
}

/// [`check_transaction_validity`] on a raw `tx_extra` byte stream.
pub fn check_tx_extra_bytes(bytes: &[u8]) -> bool {
    match TxExtra::parse(bytes) {
        Ok(extra) => check_transaction_validity(&extra),
        Err(e) => {
            warn!(error = %e, "rejecting unparsable tx_extra");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pepenet_social_args::SocialArgsBuilder;
    use pepenet_social_extra::ExtraFieldsExt;

    fn pep() -> SocialFeature {
        SocialFeature::derive_from(&SocialArgsBuilder::pep("pepe has a good day").build())
            .unwrap()
    }

    #[test]
    fn test_embed_writes_one_tagged_field() {
        let mut extra = TxExtra::new();
        extra.add_field(0x02, b"unrelated");
        embed(&pep(), &mut extra).unwrap();

        assert_eq!(extra.len(), 2);
        assert_eq!(extra.count_tag(SocialFeatureKind::Pep.tag()), 1);
        let payload = extra.find_field(0x00).unwrap();
        assert!(decompress(payload).is_ok());
    }

    #[test]
    fn test_embed_refuses_second_feature() {
        let mut extra = TxExtra::new();
        embed(&pep(), &mut extra).unwrap();
        assert_eq!(
            embed(&pep(), &mut extra),
            Err(SocialError::DuplicateFeature(2))
        );
        assert_eq!(extra.len(), 1);
    }

    #[test]
    fn test_embed_rejects_invalid_feature() {
        let bad = SocialFeature::derive_from(&SocialArgsBuilder::pep("").build()).unwrap();
        let mut extra = TxExtra::new();
        assert!(matches!(
            embed(&bad, &mut extra),
            Err(SocialError::Validation(_))
        ));
        assert!(extra.is_empty());
    }

    #[test]
    fn test_extract_roundtrip() {
        let mut extra = TxExtra::new();
        embed(&pep(), &mut extra).unwrap();
        let feature = extract_and_verify(&extra, None).unwrap().unwrap();
        assert_eq!(feature.msg(), "pepe has a good day");
        assert!(feature.is_valid());
    }

    #[test]
    fn test_absent_is_valid() {
        let mut extra = TxExtra::new();
        assert_eq!(extract_and_verify(&extra, None), Ok(None));
        assert!(check_transaction_validity(&extra));

        extra.add_field(0x02, b"nonce");
        assert_eq!(extract_and_verify(&extra, None), Ok(None));
        assert!(check_transaction_validity(&extra));
    }

    #[test]
    fn test_garbage_payload() {
        let mut extra = TxExtra::new();
        extra.add_field(SocialFeatureKind::Post.tag(), b"not zstd");
        assert!(matches!(
            extract_and_verify(&extra, None),
            Err(SocialError::Decompression(_))
        ));
        assert!(!check_transaction_validity(&extra));
    }

    #[test]
    fn test_raw_stream() {
        let mut extra = TxExtra::new();
        embed(&pep(), &mut extra).unwrap();
        assert!(check_tx_extra_bytes(&extra.to_bytes()));
        assert!(check_tx_extra_bytes(&[]));

        let mut truncated = extra.to_bytes();
        truncated.pop();
        assert!(!check_tx_extra_bytes(&truncated));
    }
}
