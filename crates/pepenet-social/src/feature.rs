//! The social feature entity: derivation, validation, binary encoding.

use pepenet_social_args::SocialArgs;
use pepenet_social_core::{
    compressed_len, Ed25519PublicKey, Ed25519Signature, FixedBytes, Keypair, SocialFeatureKind,
    TxHash,
};
use prost::Message;
use serde::Serialize;
use tracing::debug;

use crate::canonical::signing_message;
use crate::error::{Result, SocialError, ValidationError};
use crate::wire::FeatureProto;

/// Which key a signature was verified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The public key carried by the feature.
    Embedded,
    /// A key supplied by the caller.
    External,
    /// The key derived from the signing seed, kept in memory only.
    Signer,
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    /// No key and no signature.
    Unsigned,
    /// The signature verified.
    Verified(KeySource),
}

/// A pep or post.
///
/// Built with [`SocialFeature::derive_from`] or decoded with
/// [`SocialFeature::load_from_binary`]. Only a loaded and validated feature
/// can be encoded.
#[derive(Debug, Clone)]
pub struct SocialFeature {
    kind: SocialFeatureKind,
    msg: String,
    title: Option<String>,
    pseudonym: Option<String>,
    public_key: Option<Ed25519PublicKey>,
    signature: Option<Ed25519Signature>,
    tx_ref: Option<TxHash>,
    pepetag: Option<String>,
    donation_address: Option<String>,
    /// Public half of the derived signing key. Never encoded and never
    /// part of the signing message.
    signer: Option<Ed25519PublicKey>,
    loaded: bool,
    valid: bool,
}

impl PartialEq for SocialFeature {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.msg == other.msg
            && self.title == other.title
            && self.pseudonym == other.pseudonym
            && self.public_key == other.public_key
            && self.signature == other.signature
            && self.tx_ref == other.tx_ref
            && self.pepetag == other.pepetag
            && self.donation_address == other.donation_address
            && self.loaded == other.loaded
            && self.valid == other.valid
    }
}

impl Eq for SocialFeature {}

impl SocialFeature {
    /// Build a feature from parsed arguments, signing it if a seed is given.
    pub fn derive_from(args: &SocialArgs) -> Result<Self> {
        let mut feature = Self {
            kind: args.kind(),
            msg: args.msg().to_owned(),
            title: args.title().map(str::to_owned),
            pseudonym: args.pseudonym().map(str::to_owned),
            public_key: None,
            signature: None,
            tx_ref: args.tx_ref().copied(),
            pepetag: args.pepetag().map(str::to_owned),
            donation_address: args.donation_address().map(str::to_owned),
            signer: None,
            loaded: false,
            valid: false,
        };

        if let Some(signing) = args.signing() {
            let keypair = Keypair::derive(signing.sk_seed())?;
            if signing.post_pk() {
                feature.public_key = Some(keypair.public_key());
            }
            // The message covers the key only when it is published.
            feature.signature = Some(keypair.sign(&signing_message(&feature)));
            feature.signer = Some(keypair.public_key());
        }

        feature.loaded = true;
        debug!(
            kind = %feature.kind,
            signed = feature.signature.is_some(),
            embedded_key = feature.public_key.is_some(),
            "derived social feature"
        );
        Ok(feature)
    }

    /// Decode a feature and validate it without an external key.
    pub fn load_from_binary(kind: SocialFeatureKind, bytes: &[u8]) -> Result<Self> {
        Self::load_from_binary_with_key(kind, bytes, None)
    }

    /// Decode a feature and validate it, checking a signature without an
    /// embedded key against `external`.
    pub fn load_from_binary_with_key(
        kind: SocialFeatureKind,
        bytes: &[u8],
        external: Option<&Ed25519PublicKey>,
    ) -> Result<Self> {
        let mut feature = Self::decode(kind, bytes)?;
        feature.validate(external)?;
        Ok(feature)
    }

    /// Decode without validating. The result is loaded but not valid.
    pub(crate) fn decode(kind: SocialFeatureKind, bytes: &[u8]) -> Result<Self> {
        let proto = FeatureProto::decode(bytes).map_err(|e| SocialError::Decode(e.to_string()))?;

        Ok(Self {
            kind,
            msg: proto.msg,
            title: present(proto.title),
            pseudonym: present(proto.pseudonym),
            public_key: fixed(proto.public_key)?,
            signature: fixed(proto.signature)?,
            tx_ref: fixed(proto.tx_ref)?,
            pepetag: present(proto.pepetag),
            donation_address: present(proto.donation_address),
            signer: None,
            loaded: true,
            valid: false,
        })
    }

    /// Encode to the binary wire form.
    pub fn dump_to_binary(&self) -> Result<Vec<u8>> {
        self.require_valid()?;
        Ok(self.to_proto().encode_to_vec())
    }

    /// Check every field and the signature.
    ///
    /// A signature needs a key. The embedded key is used when present;
    /// otherwise `external`, or the signer's key for a feature derived in
    /// this process. Two available keys must be equal. Nothing in the
    /// feature changes on failure; on success it is marked valid.
    pub fn validate(
        &mut self,
        external: Option<&Ed25519PublicKey>,
    ) -> std::result::Result<SignatureCheck, ValidationError> {
        let check = self.check(external)?;
        self.valid = true;
        Ok(check)
    }

    fn check(
        &self,
        external: Option<&Ed25519PublicKey>,
    ) -> std::result::Result<SignatureCheck, ValidationError> {
        if !self.loaded {
            return Err(ValidationError::NotLoaded);
        }
        let bounds = self.kind.limits();

        if self.msg.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let size = compressed_len(self.msg.as_bytes())?;
        if size > bounds.max_compressed_msg {
            return Err(ValidationError::MessageTooLarge {
                kind: self.kind,
                size,
                max: bounds.max_compressed_msg,
            });
        }

        match (bounds.title, &self.title) {
            (Some(range), Some(title)) => check_len("title", title, range)?,
            (Some(_), None) => return Err(invalid("title", "posts require a title")),
            (None, Some(_)) => return Err(invalid("title", "peps cannot carry a title")),
            (None, None) => {}
        }
        if let Some(pseudonym) = &self.pseudonym {
            check_len("pseudonym", pseudonym, bounds.pseudonym)?;
        }
        if let Some(pepetag) = &self.pepetag {
            check_len("pepetag", pepetag, bounds.pepetag)?;
        }
        if let Some(address) = &self.donation_address {
            check_len("donation_address", address, bounds.donation_address)?;
        }

        match (&self.public_key, &self.signature) {
            (None, None) => Ok(SignatureCheck::Unsigned),
            (Some(_), None) => Err(ValidationError::MissingSignature),
            (Some(embedded), Some(signature)) => {
                if external.is_some_and(|key| key != embedded) {
                    return Err(ValidationError::KeyMismatch);
                }
                self.verify_with(embedded, signature)?;
                Ok(SignatureCheck::Verified(KeySource::Embedded))
            }
            (None, Some(signature)) => match (external, &self.signer) {
                (Some(key), signer) => {
                    if signer.as_ref().is_some_and(|signer| signer != key) {
                        return Err(ValidationError::KeyMismatch);
                    }
                    self.verify_with(key, signature)?;
                    Ok(SignatureCheck::Verified(KeySource::External))
                }
                (None, Some(signer)) => {
                    self.verify_with(signer, signature)?;
                    Ok(SignatureCheck::Verified(KeySource::Signer))
                }
                (None, None) => Err(ValidationError::MissingPublicKey),
            },
        }
    }

    fn verify_with(
        &self,
        key: &Ed25519PublicKey,
        signature: &Ed25519Signature,
    ) -> std::result::Result<(), ValidationError> {
        key.verify(&signing_message(self), signature)
            .map_err(|_| ValidationError::InvalidSignature)
    }

    /// Render a validated feature as JSON. Fixed-width fields are hex.
    pub fn to_json(&self) -> Result<String> {
        self.require_valid()?;
        let view = FeatureJson {
            kind: self.kind,
            msg: &self.msg,
            title: self.title.as_deref(),
            pseudonym: self.pseudonym.as_deref(),
            public_key: self.public_key.as_ref(),
            signature: self.signature.as_ref(),
            tx_ref: self.tx_ref.as_ref(),
            pepetag: self.pepetag.as_deref(),
            donation_address: self.donation_address.as_deref(),
        };
        serde_json::to_string(&view).map_err(|e| SocialError::Json(e.to_string()))
    }

    fn to_proto(&self) -> FeatureProto {
        FeatureProto {
            msg: self.msg.clone(),
            pseudonym: self.pseudonym.clone(),
            public_key: self.public_key.map(|k| k.to_fixed_bytes()),
            tx_ref: self.tx_ref.map(|h| h.to_fixed_bytes()),
            pepetag: self.pepetag.clone(),
            donation_address: self.donation_address.clone(),
            signature: self.signature.map(|s| s.to_fixed_bytes()),
            title: self.title.clone(),
        }
    }

    fn require_valid(&self) -> Result<()> {
        if !self.loaded {
            return Err(SocialError::NotLoaded);
        }
        if !self.valid {
            return Err(SocialError::NotValidated);
        }
        Ok(())
    }

    pub fn kind(&self) -> SocialFeatureKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn pseudonym(&self) -> Option<&str> {
        self.pseudonym.as_deref()
    }

    /// The embedded public key, if published.
    pub fn public_key(&self) -> Option<&Ed25519PublicKey> {
        self.public_key.as_ref()
    }

    pub fn signature(&self) -> Option<&Ed25519Signature> {
        self.signature.as_ref()
    }

    pub fn tx_ref(&self) -> Option<&TxHash> {
        self.tx_ref.as_ref()
    }

    pub fn pepetag(&self) -> Option<&str> {
        self.pepetag.as_deref()
    }

    pub fn donation_address(&self) -> Option<&str> {
        self.donation_address.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

#[derive(Serialize)]
struct FeatureJson<'a> {
    kind: SocialFeatureKind,
    msg: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pseudonym: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<&'a Ed25519PublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'a Ed25519Signature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tx_ref: Option<&'a TxHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pepetag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    donation_address: Option<&'a str>,
}

/// Empty on the wire means absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn fixed<T: FixedBytes>(value: Option<Vec<u8>>) -> Result<Option<T>> {
    match value {
        Some(bytes) if !bytes.is_empty() => Ok(Some(T::from_fixed_bytes(&bytes)?)),
        _ => Ok(None),
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field,
        reason: reason.into(),
    }
}

fn check_len(
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
) -> std::result::Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(invalid(
            field,
            format!("length {} outside [{}, {}]", len, min, max),
        ));
    }
    Ok(())
}
