//! Argument vectors: JSON inputs that must parse, and inputs that must not.
//!
//! The invalid set covers each rule the parser enforces: missing `msg`,
//! malformed JSON, out-of-range lengths, `sk_seed` / `post_pk` coupling,
//! wrong types, and malformed `tx_ref`.

use pepenet_social_core::SocialFeatureKind;

/// A JSON argument document.
#[derive(Debug, Clone, Copy)]
pub struct ArgsVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Kind the document is parsed as.
    pub kind: SocialFeatureKind,
    /// Raw JSON.
    pub json: &'static str,
}

const fn pep(name: &'static str, json: &'static str) -> ArgsVector {
    ArgsVector {
        name,
        kind: SocialFeatureKind::Pep,
        json,
    }
}

const fn post(name: &'static str, json: &'static str) -> ArgsVector {
    ArgsVector {
        name,
        kind: SocialFeatureKind::Post,
        json,
    }
}

/// Pep arguments that parse, derive, and validate.
pub const VALID_PEP_ARGS: &[ArgsVector] = &[
    pep(
        "pseudonym",
        r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1"}}"#,
    ),
    pep(
        "signed, key published",
        r#"{"pep_args": {"msg": "pepe has a good day", "sk_seed": "123456", "post_pk": true}}"#,
    ),
    pep(
        "pseudonym, signed, key published",
        r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1", "sk_seed": "123456", "post_pk": true}}"#,
    ),
    pep(
        "pseudonym, signed, key withheld",
        r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1", "sk_seed": "123456", "post_pk": false}}"#,
    ),
    pep(
        "tx_ref",
        r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1", "tx_ref": "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3"}}"#,
    ),
    pep(
        "tx_ref, pepetag",
        r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1", "tx_ref": "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3", "pepetag": "good"}}"#,
    ),
    pep(
        "tx_ref, pepetag, donation address",
        r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1", "tx_ref": "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3", "pepetag": "good", "donation_address": "P5cyrZT9T6CUwUXA46ykaQSy1SDmmWkGgAYkdAFJ5pix6ppbkUC1WsDTddJVDoMf7L59CqU3yCeGoE9VnkmQHVM41YedJed96"}}"#,
    ),
    pep(
        "every field",
        r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1", "sk_seed": "123456", "post_pk": true, "tx_ref": "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3", "pepetag": "good", "donation_address": "P5cyrZT9T6CUwUXA46ykaQSy1SDmmWkGgAYkdAFJ5pix6ppbkUC1WsDTddJVDoMf7L59CqU3yCeGoE9VnkmQHVM41YedJed96"}}"#,
    ),
];

/// Pep arguments rejected by the parser.
pub const INVALID_PEP_ARGS: &[ArgsVector] = &[
    pep("empty args", r#"{"pep_args": {}}"#),
    pep("trailing comma", r#"{"pep_args": {"msg": "",}}"#),
    pep("empty pseudonym", r#"{"pep_args": {"msg": "m", "pseudonym": ""}}"#),
    pep(
        "long pseudonym",
        r#"{"pep_args": {"msg": "m", "pseudonym": "goodgoodgoodgoodgoodgoodgoodgoodgoodgoodgoodgoodgoodgood"}}"#,
    ),
    pep("sk_seed alone", r#"{"pep_args": {"msg": "m", "sk_seed": "123456"}}"#),
    pep(
        "post_pk not a boolean",
        r#"{"pep_args": {"msg": "m", "sk_seed": "123456", "post_pk": 1}}"#,
    ),
    pep("post_pk alone", r#"{"pep_args": {"msg": "m", "post_pk": true}}"#),
    pep(
        "short tx_ref",
        r#"{"pep_args": {"msg": "m", "tx_ref": "a665a45920422f"}}"#,
    ),
    pep(
        "long tx_ref",
        r#"{"pep_args": {"msg": "m", "tx_ref": "a665a45920422a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3f"}}"#,
    ),
    pep(
        "non-hex tx_ref",
        r#"{"pep_args": {"msg": "m", "tx_ref": "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27aeK"}}"#,
    ),
    pep("empty pepetag", r#"{"pep_args": {"msg": "m", "pepetag": ""}}"#),
    pep(
        "long pepetag",
        r#"{"pep_args": {"msg": "m", "pepetag": "pepepepeeppepepepepppepepepeeppepepepepp"}}"#,
    ),
    pep(
        "empty donation address",
        r#"{"pep_args": {"msg": "m", "donation_address": ""}}"#,
    ),
    pep(
        "long donation address",
        r#"{"pep_args": {"msg": "m", "donation_address": "P5cyrZT9T6CUwUXA46ykaQSy1SDmmWkGgAYkdAFJ5pix6ppbkUC1WsDTddJVDoMf7L59CqU3yCeGoE9VnkmQHVM41YedJed96P5cyrZT9T6CUwUXA46ykaQSy1SDmmWkGgAYkdAFJ5pix6ppbkUC1WsDTddJVDoMf7L59CqU3yCeGoE9VnkmQHVM41YedJed96"}}"#,
    ),
    pep(
        "short donation address",
        r#"{"pep_args": {"msg": "m", "donation_address": "P5cyrZT9T6CUwUXA46ykaQSy1SDmmWkGgAYkdAFJ5pix6ppbkUC1WsDTddJVDoMf7L59CqU3yCeGoE9VnkmQHVM41YedJed9"}}"#,
    ),
    pep("empty msg", r#"{"pep_args": {"msg": ""}}"#),
    pep(
        "title on a pep",
        r#"{"pep_args": {"msg": "m", "title": "pepe's journey"}}"#,
    ),
    pep("wrong wrapper", r#"{"post_args": {"msg": "m", "title": "t"}}"#),
];

/// Post arguments that parse, derive, and validate.
pub const VALID_POST_ARGS: &[ArgsVector] = &[
    post(
        "title only",
        r#"{"post_args": {"title": "pepe's journey", "msg": "pepe has a good day"}}"#,
    ),
    post(
        "signed, key withheld",
        r#"{"post_args": {"title": "pepe's journey", "msg": "pepe has a good day", "sk_seed": "123456", "post_pk": false}}"#,
    ),
    post(
        "every field",
        r#"{"post_args": {"title": "pepe's journey", "msg": "pepe has a good day", "pseudonym": "pepe1", "sk_seed": "123456", "post_pk": true, "tx_ref": "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3", "pepetag": "good", "donation_address": "P5cyrZT9T6CUwUXA46ykaQSy1SDmmWkGgAYkdAFJ5pix6ppbkUC1WsDTddJVDoMf7L59CqU3yCeGoE9VnkmQHVM41YedJed96"}}"#,
    ),
];

/// Post arguments rejected by the parser.
pub const INVALID_POST_ARGS: &[ArgsVector] = &[
    post("missing title", r#"{"post_args": {"msg": "pepe has a good day"}}"#),
    post(
        "empty title",
        r#"{"post_args": {"title": "", "msg": "pepe has a good day"}}"#,
    ),
    post("missing msg", r#"{"post_args": {"title": "pepe's journey"}}"#),
    post(
        "sk_seed alone",
        r#"{"post_args": {"title": "t", "msg": "m", "sk_seed": "123456"}}"#,
    ),
    post("pep wrapper", r#"{"pep_args": {"msg": "m"}}"#),
];

/// Every valid vector.
pub fn valid_vectors() -> impl Iterator<Item = &'static ArgsVector> {
    VALID_PEP_ARGS.iter().chain(VALID_POST_ARGS)
}

/// Every invalid vector.
pub fn invalid_vectors() -> impl Iterator<Item = &'static ArgsVector> {
    INVALID_PEP_ARGS.iter().chain(INVALID_POST_ARGS)
}
