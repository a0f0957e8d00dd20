//! The byte message a feature's signature covers.
//!
//! Fixed order, raw concatenation, absent fields contribute nothing:
//!
//! ```text
//! msg || title || pseudonym || tx_ref(32) || public_key(32) || pepetag || donation_address
//! ```
//!
//! Only the embedded public key enters the message. A key supplied at
//! verification time never does.

use crate::feature::SocialFeature;

/// Build the signing message for a feature's current state.
pub fn signing_message(feature: &SocialFeature) -> Vec<u8> {
    let mut buf = Vec::with_capacity(feature.msg().len() + 128);
    buf.extend_from_slice(feature.msg().as_bytes());
    if let Some(title) = feature.title() {
        buf.extend_from_slice(title.as_bytes());
    }
    if let Some(pseudonym) = feature.pseudonym() {
        buf.extend_from_slice(pseudonym.as_bytes());
    }
    if let Some(tx_ref) = feature.tx_ref() {
        buf.extend_from_slice(tx_ref.as_bytes());
    }
    if let Some(public_key) = feature.public_key() {
        buf.extend_from_slice(public_key.as_bytes());
    }
    if let Some(pepetag) = feature.pepetag() {
        buf.extend_from_slice(pepetag.as_bytes());
    }
    if let Some(address) = feature.donation_address() {
        buf.extend_from_slice(address.as_bytes());
    }
    buf
}
