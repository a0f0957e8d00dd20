//! Proptest generators for property-based testing.
//!
//! Every strategy here produces values inside the per-kind bounds, so a
//! generated [`SocialArgs`] always parses, derives, and validates.

use proptest::prelude::*;

use pepenet_social_args::{SocialArgs, SocialArgsBuilder};
use pepenet_social_core::{limits, Ed25519PublicKey, Keypair, SocialFeatureKind, TxHash};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a random TxHash.
pub fn tx_hash() -> impl Strategy<Value = TxHash> {
    any::<[u8; 32]>().prop_map(TxHash::from_bytes)
}

/// Generate non-empty seed material.
pub fn sk_seed() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=64)
}

/// Generate printable text of `min..=max` characters.
pub fn text(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>().prop_filter("printable", |c| !c.is_control()), min..=max)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generate a message that stays under every compressed-size limit.
pub fn msg() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?']{1,200}"
}

/// Generate a pseudonym.
pub fn pseudonym() -> impl Strategy<Value = String> {
    text(1, limits::PSEUDONYM_MAX)
}

/// Generate a pepetag.
pub fn pepetag() -> impl Strategy<Value = String> {
    text(1, limits::PEPETAG_MAX)
}

/// Generate a post title.
pub fn title() -> impl Strategy<Value = String> {
    text(1, limits::POST_TITLE_MAX)
}

/// Generate a donation address.
pub fn donation_address() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz".as_slice()),
        limits::DONATION_ADDRESS_MIN..=limits::DONATION_ADDRESS_MAX,
    )
    .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

/// Generate a feature kind.
pub fn kind() -> impl Strategy<Value = SocialFeatureKind> {
    prop_oneof![Just(SocialFeatureKind::Pep), Just(SocialFeatureKind::Post)]
}

/// Parameters for generating social arguments.
#[derive(Debug, Clone)]
pub struct ArgsParams {
    pub kind: SocialFeatureKind,
    pub msg: String,
    pub title: String,
    pub pseudonym: Option<String>,
    pub signing: Option<(Vec<u8>, bool)>,
    pub tx_ref: Option<TxHash>,
    pub pepetag: Option<String>,
    pub donation_address: Option<String>,
}

impl Arbitrary for ArgsParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            kind(),
            msg(),
            title(),
            prop::option::of(pseudonym()),
            prop::option::of((sk_seed(), any::<bool>())),
            prop::option::of(tx_hash()),
            prop::option::of(pepetag()),
            prop::option::of(donation_address()),
        )
            .prop_map(
                |(kind, msg, title, pseudonym, signing, tx_ref, pepetag, donation_address)| {
                    ArgsParams {
                        kind,
                        msg,
                        title,
                        pseudonym,
                        signing,
                        tx_ref,
                        pepetag,
                        donation_address,
                    }
                },
            )
            .boxed()
    }
}

/// Build arguments from params. `title` is used for posts only.
pub fn args_from_params(params: &ArgsParams) -> SocialArgs {
    let mut builder = match params.kind {
        SocialFeatureKind::Pep => SocialArgsBuilder::pep(params.msg.clone()),
        SocialFeatureKind::Post => {
            SocialArgsBuilder::post(params.title.clone(), params.msg.clone())
        }
    };
    if let Some(pseudonym) = &params.pseudonym {
        builder = builder.pseudonym(pseudonym.clone());
    }
    if let Some((seed, post_pk)) = &params.signing {
        builder = builder.signing(seed.clone(), *post_pk);
    }
    if let Some(tx_ref) = params.tx_ref {
        builder = builder.tx_ref(tx_ref);
    }
    if let Some(pepetag) = &params.pepetag {
        builder = builder.pepetag(pepetag.clone());
    }
    if let Some(address) = &params.donation_address {
        builder = builder.donation_address(address.clone());
    }
    builder.build()
}

/// Generate social arguments.
pub fn social_args() -> impl Strategy<Value = SocialArgs> {
    any::<ArgsParams>().prop_map(|params| args_from_params(&params))
}
