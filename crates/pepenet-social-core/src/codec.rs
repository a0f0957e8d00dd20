//! Fixed-size binary codec for hashes, public keys and signatures.
//!
//! Every value decodes from exactly `LEN` bytes. Anything shorter or longer
//! is a [`CoreError::LengthMismatch`], never a silent truncation or pad.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::{Ed25519PublicKey, Ed25519Signature};
use crate::error::{CoreError, Result};
use crate::types::TxHash;

/// A value with a fixed-width byte representation.
pub trait FixedBytes: Sized {
    /// Exact encoded length in bytes.
    const LEN: usize;

    /// Name used in error messages.
    const NAME: &'static str;

    /// Encode to exactly `LEN` bytes.
    fn to_fixed_bytes(&self) -> Vec<u8>;

    /// Decode from exactly `LEN` bytes.
    fn from_fixed_bytes(bytes: &[u8]) -> Result<Self>;

    /// Lowercase hex of the fixed bytes.
    fn to_hex(&self) -> String {
        hex::encode(self.to_fixed_bytes())
    }

    /// Parse from hex. The decoded length must be exactly `LEN`.
    fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidHex {
            what: Self::NAME,
            reason: e.to_string(),
        })?;
        Self::from_fixed_bytes(&bytes)
    }
}

fn to_array<const N: usize>(what: &'static str, bytes: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(bytes).map_err(|_| CoreError::LengthMismatch {
        what,
        expected: N,
        actual: bytes.len(),
    })
}

impl FixedBytes for TxHash {
    const LEN: usize = 32;
    const NAME: &'static str = "tx_ref";

    fn to_fixed_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_fixed_bytes(bytes: &[u8]) -> Result<Self> {
        to_array(Self::NAME, bytes).map(Self)
    }
}

impl FixedBytes for Ed25519PublicKey {
    const LEN: usize = 32;
    const NAME: &'static str = "public key";

    fn to_fixed_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_fixed_bytes(bytes: &[u8]) -> Result<Self> {
        to_array(Self::NAME, bytes).map(Self)
    }
}

impl FixedBytes for Ed25519Signature {
    const LEN: usize = 64;
    const NAME: &'static str = "signature";

    fn to_fixed_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_fixed_bytes(bytes: &[u8]) -> Result<Self> {
        to_array(Self::NAME, bytes).map(Self)
    }
}

/// Serialize fixed-size values as hex strings.
macro_rules! impl_hex_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                <$ty>::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_hex_serde!(TxHash);
impl_hex_serde!(Ed25519PublicKey);
impl_hex_serde!(Ed25519Signature);
