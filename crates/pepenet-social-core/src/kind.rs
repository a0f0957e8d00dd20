//! Social feature kinds and their size limits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `tx_extra` tag of a compressed pep.
pub const PEP_SOCIAL_FEATURE_TAG: u8 = 0x00;

/// `tx_extra` tag of a compressed post.
pub const POST_SOCIAL_FEATURE_TAG: u8 = 0x01;

/// Size limits. Lengths of text fields are counted in characters, the
/// message limits in compressed bytes.
pub mod limits {
    /// Maximum compressed size of a pep's `msg`.
    pub const PEP_MAX_COMPRESSED_MSG: usize = 512;
    /// Maximum compressed size of a post's `msg`.
    pub const POST_MAX_COMPRESSED_MSG: usize = 4096;
    /// Maximum length of a post's `title`.
    pub const POST_TITLE_MAX: usize = 128;
    /// Maximum length of a `pseudonym`.
    pub const PSEUDONYM_MAX: usize = 32;
    /// Maximum length of a `pepetag`.
    pub const PEPETAG_MAX: usize = 32;
    /// Minimum length of a `donation_address`.
    pub const DONATION_ADDRESS_MIN: usize = 97;
    /// Maximum length of a `donation_address`.
    pub const DONATION_ADDRESS_MAX: usize = 108;
    /// Length of a hex-encoded `tx_ref`.
    pub const TX_REF_HEX_LEN: usize = 64;
}

/// Per-kind bounds applied at parse time and again at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLimits {
    pub max_compressed_msg: usize,
    /// `None` when the kind carries no title.
    pub title: Option<(usize, usize)>,
    pub pseudonym: (usize, usize),
    pub pepetag: (usize, usize),
    pub donation_address: (usize, usize),
}

impl FeatureLimits {
    /// Limits for peps.
    pub const PEP: Self = Self {
        max_compressed_msg: limits::PEP_MAX_COMPRESSED_MSG,
        title: None,
        pseudonym: (1, limits::PSEUDONYM_MAX),
        pepetag: (1, limits::PEPETAG_MAX),
        donation_address: (limits::DONATION_ADDRESS_MIN, limits::DONATION_ADDRESS_MAX),
    };

    /// Limits for posts.
    pub const POST: Self = Self {
        max_compressed_msg: limits::POST_MAX_COMPRESSED_MSG,
        title: Some((1, limits::POST_TITLE_MAX)),
        ..Self::PEP
    };
}

/// The kind of social feature carried by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SocialFeatureKind {
    /// A short message.
    Pep = PEP_SOCIAL_FEATURE_TAG,
    /// A titled message with a larger size allowance.
    Post = POST_SOCIAL_FEATURE_TAG,
}

impl SocialFeatureKind {
    /// All kinds, in tag order.
    pub const ALL: [Self; 2] = [Self::Pep, Self::Post];

    /// The `tx_extra` tag for this kind.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Try to parse from a `tx_extra` tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            PEP_SOCIAL_FEATURE_TAG => Some(Self::Pep),
            POST_SOCIAL_FEATURE_TAG => Some(Self::Post),
            _ => None,
        }
    }

    /// Check whether a tag belongs to any social feature.
    pub fn is_social_tag(tag: u8) -> bool {
        Self::from_tag(tag).is_some()
    }

    /// Top-level JSON key wrapping this kind's arguments.
    pub fn args_key(self) -> &'static str {
        match self {
            Self::Pep => "pep_args",
            Self::Post => "post_args",
        }
    }

    /// Size limits for this kind.
    pub fn limits(self) -> FeatureLimits {
        match self {
            Self::Pep => FeatureLimits::PEP,
            Self::Post => FeatureLimits::POST,
        }
    }

    /// Whether features of this kind carry a title.
    pub fn has_title(self) -> bool {
        self.limits().title.is_some()
    }
}

impl fmt::Display for SocialFeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pep => write!(f, "pep"),
            Self::Post => write!(f, "post"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tag_roundtrip() {
        for kind in SocialFeatureKind::ALL {
            assert_eq!(SocialFeatureKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(SocialFeatureKind::Pep.tag(), 0x00);
        assert_eq!(SocialFeatureKind::Post.tag(), 0x01);
        assert_eq!(SocialFeatureKind::from_tag(0x02), None);
        assert!(!SocialFeatureKind::is_social_tag(0xde));
    }

    #[test]
    fn test_kind_limits() {
        assert_eq!(SocialFeatureKind::Pep.limits().max_compressed_msg, 512);
        assert_eq!(SocialFeatureKind::Post.limits().max_compressed_msg, 4096);
        assert!(!SocialFeatureKind::Pep.has_title());
        assert_eq!(SocialFeatureKind::Post.limits().title, Some((1, 128)));
        assert_eq!(
            SocialFeatureKind::Post.limits().donation_address,
            (97, 108)
        );
    }

    #[test]
    fn test_args_key() {
        assert_eq!(SocialFeatureKind::Pep.args_key(), "pep_args");
        assert_eq!(SocialFeatureKind::Post.args_key(), "post_args");
        assert_eq!(SocialFeatureKind::Post.to_string(), "post");
    }
}
