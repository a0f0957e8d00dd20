//! Staged JSON argument parser.
//!
//! ```text
//! Empty -> JsonLoaded -> SchemaValidated -> ArgsLoaded -> Validated
//! ```
//!
//! Each stage must complete before the next one can run. A failed stage
//! leaves the parser where it was.

use std::fmt;

use pepenet_social_core::{FixedBytes, SocialFeatureKind, TxHash};
use serde_json::{Map, Value};
use tracing::debug;

use crate::args::{SigningArgs, SocialArgs};
use crate::error::{ArgsError, Result};
use crate::schema::Schema;

/// Progress of an [`ArgsParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParseStage {
    Empty,
    JsonLoaded,
    SchemaValidated,
    ArgsLoaded,
    Validated,
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::JsonLoaded => "json loaded",
            Self::SchemaValidated => "schema validated",
            Self::ArgsLoaded => "args loaded",
            Self::Validated => "validated",
        };
        f.write_str(s)
    }
}

/// Parses user JSON into [`SocialArgs`] for one feature kind.
#[derive(Debug)]
pub struct ArgsParser {
    schema: Schema,
    stage: ParseStage,
    document: Option<Value>,
    args: Option<SocialArgs>,
}

impl ArgsParser {
    /// Create a parser for a kind.
    pub fn new(kind: SocialFeatureKind) -> Self {
        Self {
            schema: Schema::for_kind(kind),
            stage: ParseStage::Empty,
            document: None,
            args: None,
        }
    }

    pub fn kind(&self) -> SocialFeatureKind {
        self.schema.kind()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn stage(&self) -> ParseStage {
        self.stage
    }

    /// Parse and store a JSON document. No shape checks yet.
    ///
    /// Loading a new document restarts the parser.
    pub fn load_json(&mut self, raw: &str) -> Result<()> {
        let document: Value = serde_json::from_str(raw)?;
        self.document = Some(document);
        self.args = None;
        self.stage = ParseStage::JsonLoaded;
        Ok(())
    }

    /// Check the loaded document against the kind's schema.
    pub fn validate_against_schema(&mut self) -> Result<()> {
        self.require("validate_against_schema", ParseStage::JsonLoaded)?;
        if self.stage > ParseStage::JsonLoaded {
            return Ok(());
        }
        let document = self.document()?;
        self.schema.validate(document)?;
        self.stage = ParseStage::SchemaValidated;
        Ok(())
    }

    /// Extract typed fields from the schema-checked document.
    pub fn load_args_from_json(&mut self) -> Result<()> {
        self.require("load_args_from_json", ParseStage::SchemaValidated)?;
        if self.stage > ParseStage::SchemaValidated {
            return Ok(());
        }
        let kind = self.kind();
        let fields = self
            .document()?
            .get(kind.args_key())
            .and_then(Value::as_object)
            .ok_or_else(|| ArgsError::Field {
                field: "args",
                reason: format!("missing {} object", kind.args_key()),
            })?;

        let signing = match (string(fields, "sk_seed")?, boolean(fields, "post_pk")?) {
            (Some(seed), Some(post_pk)) => Some(SigningArgs::new(seed, post_pk)),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ArgsError::Coupling(
                    "post_pk is required when sk_seed is defined".into(),
                ))
            }
            (None, Some(_)) => {
                return Err(ArgsError::Coupling(
                    "sk_seed is required when post_pk is defined".into(),
                ))
            }
        };

        let tx_ref = string(fields, "tx_ref")?
            .map(|hex| TxHash::from_hex(&hex))
            .transpose()
            .map_err(|e| ArgsError::Field {
                field: "tx_ref",
                reason: e.to_string(),
            })?;

        let args = SocialArgs {
            kind,
            msg: string(fields, "msg")?.ok_or_else(|| ArgsError::Field {
                field: "msg",
                reason: "required".into(),
            })?,
            title: string(fields, "title")?,
            pseudonym: string(fields, "pseudonym")?,
            signing,
            tx_ref,
            pepetag: string(fields, "pepetag")?,
            donation_address: string(fields, "donation_address")?,
        };

        debug!(%kind, signed = args.signing.is_some(), "loaded social args");
        self.args = Some(args);
        self.stage = ParseStage::ArgsLoaded;
        Ok(())
    }

    /// Check field bounds. Succeeds immediately if already validated.
    pub fn validate(&mut self) -> Result<()> {
        self.require("validate", ParseStage::ArgsLoaded)?;
        if self.stage == ParseStage::Validated {
            return Ok(());
        }
        self.loaded_args("validate")?.check_bounds()?;
        self.stage = ParseStage::Validated;
        Ok(())
    }

    /// The validated arguments, if the parser got that far.
    pub fn args(&self) -> Option<&SocialArgs> {
        match self.stage {
            ParseStage::Validated => self.args.as_ref(),
            _ => None,
        }
    }

    /// Take the validated arguments.
    pub fn into_args(self) -> Result<SocialArgs> {
        self.require("into_args", ParseStage::Validated)?;
        let found = self.stage;
        self.args.ok_or(ArgsError::Stage {
            operation: "into_args",
            expected: ParseStage::Validated,
            found,
        })
    }

    fn require(&self, operation: &'static str, expected: ParseStage) -> Result<()> {
        if self.stage < expected {
            return Err(ArgsError::Stage {
                operation,
                expected,
                found: self.stage,
            });
        }
        Ok(())
    }

    fn document(&self) -> Result<&Value> {
        self.document.as_ref().ok_or(ArgsError::Stage {
            operation: "document",
            expected: ParseStage::JsonLoaded,
            found: self.stage,
        })
    }

    fn loaded_args(&self, operation: &'static str) -> Result<&SocialArgs> {
        self.args.as_ref().ok_or(ArgsError::Stage {
            operation,
            expected: ParseStage::ArgsLoaded,
            found: self.stage,
        })
    }
}

fn string(fields: &Map<String, Value>, name: &'static str) -> Result<Option<String>> {
    match fields.get(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ArgsError::Field {
            field: name,
            reason: "expected a string".into(),
        }),
    }
}

fn boolean(fields: &Map<String, Value>, name: &'static str) -> Result<Option<bool>> {
    match fields.get(name) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ArgsError::Field {
            field: name,
            reason: "expected a boolean".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEP: &str = r#"{"pep_args": {"msg": "pepe has a good day", "pseudonym": "pepe1", "sk_seed": "123456", "post_pk": true, "tx_ref": "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3"}}"#;

    #[test]
    fn test_all_stages() {
        let mut parser = ArgsParser::new(SocialFeatureKind::Pep);
        assert_eq!(parser.stage(), ParseStage::Empty);

        parser.load_json(PEP).unwrap();
        assert_eq!(parser.stage(), ParseStage::JsonLoaded);
        parser.validate_against_schema().unwrap();
        parser.load_args_from_json().unwrap();
        assert!(parser.args().is_none());
        parser.validate().unwrap();
        assert_eq!(parser.stage(), ParseStage::Validated);

        let args = parser.into_args().unwrap();
        assert_eq!(args.msg(), "pepe has a good day");
        assert_eq!(args.pseudonym(), Some("pepe1"));
        assert_eq!(args.signing().unwrap().sk_seed(), b"123456");
        assert_eq!(
            args.tx_ref().unwrap().to_hex(),
            "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3"
        );
    }

    #[test]
    fn test_out_of_order_is_a_stage_error() {
        let mut parser = ArgsParser::new(SocialFeatureKind::Pep);
        let err = parser.validate_against_schema().unwrap_err();
        assert!(matches!(
            err,
            ArgsError::Stage {
                expected: ParseStage::JsonLoaded,
                found: ParseStage::Empty,
                ..
            }
        ));

        parser.load_json(PEP).unwrap();
        let err = parser.load_args_from_json().unwrap_err();
        assert_eq!(
            err.to_string(),
            "load_args_from_json requires the parser to be schema validated, but it is json loaded"
        );
        assert!(parser.validate().is_err());
    }

    #[test]
    fn test_into_args_reports_current_stage() {
        let mut parser = ArgsParser::new(SocialFeatureKind::Pep);
        parser.load_json(PEP).unwrap();
        parser.validate_against_schema().unwrap();
        assert_eq!(
            parser.into_args().unwrap_err(),
            ArgsError::Stage {
                operation: "into_args",
                expected: ParseStage::Validated,
                found: ParseStage::SchemaValidated,
            }
        );

        let mut parser = ArgsParser::new(SocialFeatureKind::Pep);
        parser.load_json(PEP).unwrap();
        parser.validate_against_schema().unwrap();
        parser.load_args_from_json().unwrap();
        parser.validate().unwrap();
        assert_eq!(parser.into_args().unwrap().msg(), "pepe has a good day");
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut parser = ArgsParser::new(SocialFeatureKind::Pep);
        parser.load_json(PEP).unwrap();
        parser.validate_against_schema().unwrap();
        parser.load_args_from_json().unwrap();
        parser.validate().unwrap();
        parser.validate().unwrap();
        parser.validate_against_schema().unwrap();
        assert_eq!(parser.stage(), ParseStage::Validated);
    }

    #[test]
    fn test_malformed_json() {
        let mut parser = ArgsParser::new(SocialFeatureKind::Pep);
        let err = parser.load_json("{\"pep_args\": ").unwrap_err();
        assert!(matches!(err, ArgsError::Json { line: 1, .. }));
        assert_eq!(parser.stage(), ParseStage::Empty);
    }

    #[test]
    fn test_failed_stage_keeps_position() {
        let mut parser = ArgsParser::new(SocialFeatureKind::Pep);
        parser
            .load_json(r#"{"pep_args": {"msg": "m", "pseudonym": ""}}"#)
            .unwrap();
        assert!(matches!(
            parser.validate_against_schema(),
            Err(ArgsError::Schema(_))
        ));
        assert_eq!(parser.stage(), ParseStage::JsonLoaded);
    }

    #[test]
    fn test_coupling() {
        let seed_only = r#"{"pep_args": {"msg": "m", "sk_seed": "123456"}}"#;
        let pk_only = r#"{"pep_args": {"msg": "m", "post_pk": false}}"#;

        for raw in [seed_only, pk_only] {
            let err = SocialArgs::from_json(SocialFeatureKind::Pep, raw).unwrap_err();
            assert!(matches!(err, ArgsError::Coupling(_)), "{raw}: {err}");
        }

        let both = r#"{"pep_args": {"msg": "m", "sk_seed": "123456", "post_pk": false}}"#;
        let args = SocialArgs::from_json(SocialFeatureKind::Pep, both).unwrap();
        assert!(!args.signing().unwrap().post_pk());
    }

    #[test]
    fn test_load_json_restarts() {
        let mut parser = ArgsParser::new(SocialFeatureKind::Pep);
        parser.load_json(PEP).unwrap();
        parser.validate_against_schema().unwrap();
        parser.load_json(r#"{"pep_args": {"msg": "again"}}"#).unwrap();
        assert_eq!(parser.stage(), ParseStage::JsonLoaded);
    }

    #[test]
    fn test_post_from_json() {
        let raw = r#"{"post_args": {"title": "pepe's journey", "msg": "pepe has a good day", "pepetag": "good"}}"#;
        let args = SocialArgs::from_json(SocialFeatureKind::Post, raw).unwrap();
        assert_eq!(args.kind(), SocialFeatureKind::Post);
        assert_eq!(args.title(), Some("pepe's journey"));
        assert_eq!(args.pepetag(), Some("good"));

        let err = SocialArgs::from_json(SocialFeatureKind::Pep, raw).unwrap_err();
        assert!(matches!(err, ArgsError::Schema(_)));
    }
}
