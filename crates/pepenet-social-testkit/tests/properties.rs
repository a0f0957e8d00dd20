//! Property tests across the argument, feature, and embedding layers.

use pepenet_social::{
    check_transaction_validity, embed, extract_and_verify, KeySource, SignatureCheck,
    SocialError, SocialFeature, ValidationError,
};
use pepenet_social_args::{ArgsError, SocialArgs};
use pepenet_social_core::{Keypair, SocialFeatureKind};
use pepenet_social_extra::{ExtraFields, TxExtra};
use pepenet_social_testkit::generators::{args_from_params, msg, sk_seed, ArgsParams};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn binary_roundtrip(params: ArgsParams) {
        let args = args_from_params(&params);
        let mut derived = SocialFeature::derive_from(&args).unwrap();
        let external = params
            .signing
            .as_ref()
            .map(|(seed, _)| Keypair::derive(seed).unwrap().public_key());
        derived.validate(external.as_ref()).unwrap();

        let bytes = derived.dump_to_binary().unwrap();
        let loaded =
            SocialFeature::load_from_binary_with_key(args.kind(), &bytes, external.as_ref())
                .unwrap();
        prop_assert_eq!(loaded, derived);
    }

    #[test]
    fn embed_extract_roundtrip(params: ArgsParams) {
        let args = args_from_params(&params);
        let mut derived = SocialFeature::derive_from(&args).unwrap();
        derived.validate(None).unwrap();

        let mut extra = TxExtra::new();
        embed(&derived, &mut extra).unwrap();
        let signer = params
            .signing
            .as_ref()
            .map(|(seed, _)| Keypair::derive(seed).unwrap().public_key());
        let extracted = extract_and_verify(&extra, signer.as_ref()).unwrap().unwrap();
        prop_assert_eq!(extracted, derived);

        // Without a key, only unsigned features and features embedding
        // their key can be checked.
        let self_contained = params.signing.as_ref().map_or(true, |(_, post_pk)| *post_pk);
        prop_assert_eq!(check_transaction_validity(&extra), self_contained);
    }

    #[test]
    fn signature_check_follows_key_placement(params: ArgsParams) {
        let args = args_from_params(&params);
        let mut feature = SocialFeature::derive_from(&args).unwrap();
        let check = feature.validate(None).unwrap();
        let expected = match args.signing() {
            None => SignatureCheck::Unsigned,
            Some(s) if s.post_pk() => SignatureCheck::Verified(KeySource::Embedded),
            Some(_) => SignatureCheck::Verified(KeySource::Signer),
        };
        prop_assert_eq!(check, expected);
    }

    #[test]
    fn decoded_signature_without_key_is_rejected(params in any::<ArgsParams>(), seed in sk_seed()) {
        let mut params = params;
        params.signing = Some((seed, false));
        let mut derived = SocialFeature::derive_from(&args_from_params(&params)).unwrap();
        derived.validate(None).unwrap();

        let bytes = derived.dump_to_binary().unwrap();
        prop_assert_eq!(
            SocialFeature::load_from_binary(params.kind, &bytes),
            Err(SocialError::Validation(ValidationError::MissingPublicKey))
        );
    }

    #[test]
    fn coupling_is_both_or_neither(
        msg in msg(),
        seed in prop::option::of("[0-9a-z]{1,16}"),
        post_pk in prop::option::of(any::<bool>()),
    ) {
        let mut fields = vec![format!(r#""msg": {:?}"#, msg)];
        if let Some(seed) = &seed {
            fields.push(format!(r#""sk_seed": {:?}"#, seed));
        }
        if let Some(post_pk) = post_pk {
            fields.push(format!(r#""post_pk": {}"#, post_pk));
        }
        let raw = format!(r#"{{"pep_args": {{{}}}}}"#, fields.join(", "));

        let result = SocialArgs::from_json(SocialFeatureKind::Pep, &raw);
        if seed.is_some() == post_pk.is_some() {
            prop_assert!(result.is_ok(), "{}: {:?}", raw, result);
        } else {
            prop_assert!(matches!(result, Err(ArgsError::Coupling(_))), "{}: {:?}", raw, result);
        }
    }

    #[test]
    fn two_social_fields_are_never_accepted(a: ArgsParams, b: ArgsParams) {
        let mut first = SocialFeature::derive_from(&args_from_params(&a)).unwrap();
        first.validate(None).unwrap();
        let mut second = SocialFeature::derive_from(&args_from_params(&b)).unwrap();
        second.validate(None).unwrap();

        let mut extra = TxExtra::new();
        embed(&first, &mut extra).unwrap();
        let mut scratch = TxExtra::new();
        embed(&second, &mut scratch).unwrap();
        let tag = second.kind().tag();
        extra.add_field(tag, scratch.find_field(tag).unwrap());

        prop_assert_eq!(extract_and_verify(&extra, None), Err(SocialError::DuplicateFeature(2)));
        prop_assert!(!check_transaction_validity(&extra));
    }

    #[test]
    fn other_fields_do_not_matter(fields in prop::collection::vec((2u8..=255, prop::collection::vec(any::<u8>(), 0..64)), 0..6)) {
        let mut extra = TxExtra::new();
        for (tag, payload) in &fields {
            extra.add_field(*tag, payload);
        }
        prop_assert_eq!(extract_and_verify(&extra, None), Ok(None));
        prop_assert!(check_transaction_validity(&extra));
    }

    #[test]
    fn derivation_is_deterministic(seed in sk_seed(), msg in msg()) {
        let args = pepenet_social_args::SocialArgsBuilder::pep(msg)
            .signing(seed, true)
            .build();
        let a = SocialFeature::derive_from(&args).unwrap();
        let b = SocialFeature::derive_from(&args).unwrap();
        prop_assert_eq!(a.signature(), b.signature());
        prop_assert_eq!(a.public_key(), b.public_key());
    }
}
