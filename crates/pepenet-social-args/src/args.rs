//! Typed social feature arguments.

use std::fmt;

use pepenet_social_core::{SocialFeatureKind, TxHash};

use crate::error::{ArgsError, Result};
use crate::parser::ArgsParser;

/// Seed material and the choice to publish the derived public key.
///
/// `sk_seed` and `post_pk` only exist together, so a seed without a
/// publication choice (or the reverse) cannot be represented.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningArgs {
    sk_seed: Vec<u8>,
    post_pk: bool,
}

impl SigningArgs {
    /// Create signing arguments.
    pub fn new(sk_seed: impl Into<Vec<u8>>, post_pk: bool) -> Self {
        Self {
            sk_seed: sk_seed.into(),
            post_pk,
        }
    }

    /// Seed material for key derivation.
    pub fn sk_seed(&self) -> &[u8] {
        &self.sk_seed
    }

    /// Whether the derived public key is embedded in the feature.
    pub fn post_pk(&self) -> bool {
        self.post_pk
    }
}

impl fmt::Debug for SigningArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningArgs")
            .field("sk_seed", &format_args!("<{} bytes redacted>", self.sk_seed.len()))
            .field("post_pk", &self.post_pk)
            .finish()
    }
}

/// Parsed arguments for one pep or post.
///
/// Produced by [`ArgsParser`] (or [`SocialArgs::from_json`]), or by
/// [`SocialArgsBuilder`] when the caller already has typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialArgs {
    pub(crate) kind: SocialFeatureKind,
    pub(crate) msg: String,
    pub(crate) title: Option<String>,
    pub(crate) pseudonym: Option<String>,
    pub(crate) signing: Option<SigningArgs>,
    pub(crate) tx_ref: Option<TxHash>,
    pub(crate) pepetag: Option<String>,
    pub(crate) donation_address: Option<String>,
}

impl SocialArgs {
    /// Parse a JSON document through every parser stage.
    pub fn from_json(kind: SocialFeatureKind, raw: &str) -> Result<Self> {
        let mut parser = ArgsParser::new(kind);
        parser.load_json(raw)?;
        parser.validate_against_schema()?;
        parser.load_args_from_json()?;
        parser.validate()?;
        parser.into_args()
    }

    pub fn kind(&self) -> SocialFeatureKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Title; always `Some` for posts built by the parser.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn pseudonym(&self) -> Option<&str> {
        self.pseudonym.as_deref()
    }

    pub fn signing(&self) -> Option<&SigningArgs> {
        self.signing.as_ref()
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

    /// Check the per-kind bounds that do not need compression.
    ///
    /// Lengths are counted in characters. The compressed size of `msg` is
    /// checked when the derived feature is validated.
    pub fn check_bounds(&self) -> Result<()> {
        let bounds = self.kind.limits();

        if self.msg.is_empty() {
            return Err(field_error("msg", "must not be empty"));
        }
        match (bounds.title, self.title.as_deref()) {
            (Some(range), Some(title)) => check_len("title", title, range)?,
            (Some(_), None) => return Err(field_error("title", "required for posts")),
            (None, Some(_)) => return Err(field_error("title", "not allowed for peps")),
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
        Ok(())
    }
}

fn field_error(field: &'static str, reason: impl Into<String>) -> ArgsError {
    ArgsError::Field {
        field,
        reason: reason.into(),
    }
}

fn check_len(field: &'static str, value: &str, (min, max): (usize, usize)) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(field_error(
            field,
            format!("length {} outside [{}, {}]", len, min, max),
        ));
    }
    Ok(())
}

/// Builder for [`SocialArgs`].
///
/// No bounds are checked here; use [`SocialArgs::check_bounds`] or
/// validate the derived feature.
pub struct SocialArgsBuilder {
    args: SocialArgs,
}

impl SocialArgsBuilder {
    /// Start building a pep.
    pub fn pep(msg: impl Into<String>) -> Self {
        Self {
            args: SocialArgs {
                kind: SocialFeatureKind::Pep,
                msg: msg.into(),
                title: None,
                pseudonym: None,
                signing: None,
                tx_ref: None,
                pepetag: None,
                donation_address: None,
            },
        }
    }

    /// Start building a post.
    pub fn post(title: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut builder = Self::pep(msg);
        builder.args.kind = SocialFeatureKind::Post;
        builder.args.title = Some(title.into());
        builder
    }

    /// Set the pseudonym.
    pub fn pseudonym(mut self, pseudonym: impl Into<String>) -> Self {
        self.args.pseudonym = Some(pseudonym.into());
        self
    }

    /// Sign with a key derived from `sk_seed`.
    pub fn signing(mut self, sk_seed: impl Into<Vec<u8>>, post_pk: bool) -> Self {
        self.args.signing = Some(SigningArgs::new(sk_seed, post_pk));
        self
    }

    /// Reference another transaction.
    pub fn tx_ref(mut self, tx_ref: TxHash) -> Self {
        self.args.tx_ref = Some(tx_ref);
        self
    }

    /// Set the pepetag.
    pub fn pepetag(mut self, pepetag: impl Into<String>) -> Self {
        self.args.pepetag = Some(pepetag.into());
        self
    }

    /// Set the donation address.
    pub fn donation_address(mut self, address: impl Into<String>) -> Self {
        self.args.donation_address = Some(address.into());
        self
    }

    pub fn build(self) -> SocialArgs {
        self.args
    }
}
