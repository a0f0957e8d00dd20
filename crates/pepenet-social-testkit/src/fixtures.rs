//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use pepenet_social::{embed, SocialFeature};
use pepenet_social_args::{SocialArgs, SocialArgsBuilder};
use pepenet_social_core::{Ed25519PublicKey, FixedBytes, Keypair, TxHash};
use pepenet_social_extra::TxExtra;

pub const MSG: &str = "pepe has a good day";
pub const PSEUDONYM: &str = "pepe1";
pub const SK_SEED: &str = "123456";
pub const TX_REF: &str = "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3";
pub const PEPETAG: &str = "good";
pub const TITLE: &str = "pepe's journey";
/// 97 characters, the shortest accepted address.
pub const DONATION_ADDRESS: &str = "P5cyrZT9T6CUwUXA46ykaQSy1SDmmWkGgAYkdAFJ5pix6ppbkUC1WsDTddJVDoMf7L59CqU3yCeGoE9VnkmQHVM41YedJed96";

/// A signer derived from a seed, with builders for its features.
pub struct TestFixture {
    pub sk_seed: Vec<u8>,
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a fixture for [`SK_SEED`].
    pub fn new() -> Self {
        Self::with_seed(SK_SEED)
    }

    /// Create with a specific seed.
    pub fn with_seed(seed: impl Into<Vec<u8>>) -> Self {
        let sk_seed = seed.into();
        let keypair = Keypair::derive(&sk_seed).expect("fixture seed must not be empty");
        Self { sk_seed, keypair }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// The fixture `tx_ref`.
    pub fn tx_ref() -> TxHash {
        TxHash::from_hex(TX_REF).expect("fixture tx_ref is valid hex")
    }

    /// Pep arguments carrying every field, signed with this fixture's seed.
    pub fn full_pep_args(&self, post_pk: bool) -> SocialArgs {
        SocialArgsBuilder::pep(MSG)
            .pseudonym(PSEUDONYM)
            .signing(self.sk_seed.clone(), post_pk)
            .tx_ref(Self::tx_ref())
            .pepetag(PEPETAG)
            .donation_address(DONATION_ADDRESS)
            .build()
    }

    /// Post arguments carrying every field, signed with this fixture's seed.
    pub fn full_post_args(&self, post_pk: bool) -> SocialArgs {
        SocialArgsBuilder::post(TITLE, MSG)
            .pseudonym(PSEUDONYM)
            .signing(self.sk_seed.clone(), post_pk)
            .tx_ref(Self::tx_ref())
            .pepetag(PEPETAG)
            .donation_address(DONATION_ADDRESS)
            .build()
    }

    /// Derive and validate a feature.
    pub fn feature(&self, args: &SocialArgs) -> SocialFeature {
        let mut feature = SocialFeature::derive_from(args).expect("fixture args derive");
        feature
            .validate(Some(&self.public_key()))
            .expect("fixture feature validates");
        feature
    }

    /// A transaction extension holding one embedded feature.
    pub fn embedded(&self, args: &SocialArgs) -> TxExtra {
        let mut extra = TxExtra::new();
        embed(&self.feature(args), &mut extra).expect("fixture feature embeds");
        extra
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pepenet_social::extract_and_verify;

    #[test]
    fn test_constants_are_in_bounds() {
        assert_eq!(DONATION_ADDRESS.len(), 97);
        assert_eq!(TX_REF.len(), 64);
    }

    #[test]
    fn test_fixture_embeds() {
        let fixture = TestFixture::new();
        for post_pk in [true, false] {
            let extra = fixture.embedded(&fixture.full_post_args(post_pk));
            let key = fixture.public_key();
            let feature = extract_and_verify(&extra, Some(&key)).unwrap().unwrap();
            assert_eq!(feature.public_key().is_some(), post_pk);
        }
    }
}
