//! Signing primitives for social features.
//!
//! Wraps Ed25519 signing with strong types. Signing keys are derived from
//! user-supplied seed material, domain-separated through BLAKE3.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;

use crate::error::{CoreError, Result};

/// BLAKE3 `derive_key` context for turning an `sk_seed` into a signing key.
pub const SEED_DERIVATION_CONTEXT: &str = "pepenet-social 2023-06-01 sk_seed signing key";

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Ed25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<()> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;

        let sig = Signature::from_bytes(&signature.0);

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &hex::encode(self.0)[..16])
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Ed25519PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &hex::encode(self.0)[..16])
    }
}

impl AsRef<[u8]> for Ed25519Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Ed25519Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

/// A keypair for signing social features.
///
/// This wraps ed25519-dalek's SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Create from a 32-byte secret.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Derive a keypair from arbitrary seed material.
    ///
    /// The same seed always yields the same keypair. An empty seed is
    /// rejected: it would map every unseeded signer onto one public key.
    pub fn derive(seed: &[u8]) -> Result<Self> {
        if seed.is_empty() {
            return Err(CoreError::KeyDerivation("sk_seed is empty".into()));
        }
        let secret = blake3::derive_key(SEED_DERIVATION_CONTEXT, seed);
        Ok(Self::from_seed(&secret))
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

/// Check a signature, collapsing every failure to `false`.
pub fn verify_message(
    message: &[u8],
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> bool {
    public_key.verify(message, signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_keypair_sign_verify() {
        let keypair = Keypair::derive(b"sign-verify").unwrap();
        let message = b"pepe has a good day";
        let signature = keypair.sign(message);

        keypair
            .public_key()
            .verify(message, &signature)
            .expect("valid signature should verify");

        let tampered = b"pepe has a good daY";
        assert!(keypair.public_key().verify(tampered, &signature).is_err());
    }

    #[test]
    fn test_derive_is_deterministic() {
        let kp1 = Keypair::derive(b"123456").unwrap();
        let kp2 = Keypair::derive(b"123456").unwrap();
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.sign(b"msg"), kp2.sign(b"msg"));

        let other = Keypair::derive(b"1234567").unwrap();
        assert_ne!(kp1.public_key(), other.public_key());
    }

    #[test]
    fn test_derive_rejects_empty_seed() {
        assert!(matches!(
            Keypair::derive(b""),
            Err(CoreError::KeyDerivation(_))
        ));
    }

    #[test]
    fn test_verify_message_garbage_key_is_false() {
        let keypair = Keypair::derive(b"seed").unwrap();
        let sig = keypair.sign(b"msg");
        // Not a valid curve point encoding.
        let bogus = Ed25519PublicKey::from_bytes([0xff; 32]);
        assert!(!verify_message(b"msg", &sig, &bogus));
        assert!(!verify_message(b"msg", &Ed25519Signature::from_bytes([0u8; 64]), &keypair.public_key()));
    }

    proptest! {
        #[test]
        fn prop_sign_verify(seed in prop::collection::vec(any::<u8>(), 1..64), msg in prop::collection::vec(any::<u8>(), 0..256)) {
            let kp = Keypair::derive(&seed).unwrap();
            let sig = kp.sign(&msg);
            prop_assert!(verify_message(&msg, &sig, &kp.public_key()));
        }

        #[test]
        fn prop_bit_flip_rejected(
            seed in prop::collection::vec(any::<u8>(), 1..64),
            msg in prop::collection::vec(any::<u8>(), 1..128),
            target in 0usize..3,
            idx in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let kp = Keypair::derive(&seed).unwrap();
            let mut msg = msg;
            let mut sig = kp.sign(&msg);
            let mut pk = kp.public_key();
            match target {
                0 => {
                    let i = idx.index(msg.len());
                    msg[i] ^= 1 << bit;
                }
                1 => {
                    let i = idx.index(64);
                    sig.0[i] ^= 1 << bit;
                }
                _ => {
                    let i = idx.index(32);
                    pk.0[i] ^= 1 << bit;
                }
            }
            prop_assert!(!verify_message(&msg, &sig, &pk));
        }
    }
}
