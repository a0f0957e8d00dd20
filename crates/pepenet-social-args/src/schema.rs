//! Declarative argument schema.
//!
//! One [`Schema`] per feature kind. The same declaration drives structural
//! validation of a JSON document and the JSON Schema document handed to
//! clients, so the two cannot drift apart.

use pepenet_social_core::{limits, SocialFeatureKind};
use serde_json::{json, Map, Value};

use crate::error::SchemaViolation;

/// JSON Schema dialect of [`Schema::to_json_schema`].
pub const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

const HEX_PATTERN: &str = "^[0-9A-Fa-f]*$";

/// JSON type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Boolean,
}

impl PropertyType {
    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

/// A single property of the argument object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: &'static str,
    pub ty: PropertyType,
    pub required: bool,
    /// Minimum length in characters (strings only).
    pub min_length: Option<usize>,
    /// Maximum length in characters (strings only).
    pub max_length: Option<usize>,
    /// Only hex digits allowed (strings only).
    pub hex: bool,
}

impl Property {
    fn string(name: &'static str) -> Self {
        Self {
            name,
            ty: PropertyType::String,
            required: false,
            min_length: None,
            max_length: None,
            hex: false,
        }
    }

    fn boolean(name: &'static str) -> Self {
        Self {
            ty: PropertyType::Boolean,
            ..Self::string(name)
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn length(mut self, (min, max): (usize, usize)) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    fn hex(mut self) -> Self {
        self.hex = true;
        self
    }

    fn check(&self, pointer: &str, value: &Value) -> Result<(), SchemaViolation> {
        let s = match (self.ty, value) {
            (PropertyType::Boolean, Value::Bool(_)) => return Ok(()),
            (PropertyType::String, Value::String(s)) => s,
            _ => {
                return Err(SchemaViolation::new(
                    pointer,
                    "type",
                    format!("{} must be a {}", self.name, self.ty.as_str()),
                ))
            }
        };

        let len = s.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(SchemaViolation::new(
                    pointer,
                    "minLength",
                    format!("{} has {} characters, minimum is {}", self.name, len, min),
                ));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(SchemaViolation::new(
                    pointer,
                    "maxLength",
                    format!("{} has {} characters, maximum is {}", self.name, len, max),
                ));
            }
        }
        if self.hex && !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SchemaViolation::new(
                pointer,
                "pattern",
                format!("{} must contain only hex digits", self.name),
            ));
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".into(), self.ty.as_str().into());
        if let Some(min) = self.min_length {
            obj.insert("minLength".into(), min.into());
        }
        if let Some(max) = self.max_length {
            obj.insert("maxLength".into(), max.into());
        }
        if self.hex {
            obj.insert("pattern".into(), HEX_PATTERN.into());
        }
        Value::Object(obj)
    }
}

/// The argument schema of one feature kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    kind: SocialFeatureKind,
    properties: Vec<Property>,
}

impl Schema {
    /// Build the schema for a kind.
    pub fn for_kind(kind: SocialFeatureKind) -> Self {
        let bounds = kind.limits();
        let mut properties = vec![
            // Size is bounded on the compressed form, later.
            Property::string("msg").required(),
            Property::string("pseudonym").length(bounds.pseudonym),
            Property::string("sk_seed"),
            Property::boolean("post_pk"),
            Property::string("tx_ref")
                .length((limits::TX_REF_HEX_LEN, limits::TX_REF_HEX_LEN))
                .hex(),
            Property::string("pepetag").length(bounds.pepetag),
            Property::string("donation_address").length(bounds.donation_address),
        ];
        if let Some(title) = bounds.title {
            properties.push(Property::string("title").required().length(title));
        }
        Self { kind, properties }
    }

    /// The kind this schema describes.
    pub fn kind(&self) -> SocialFeatureKind {
        self.kind
    }

    /// Declared properties of the argument object.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Check a document against this schema.
    ///
    /// The document must be an object with exactly one key, the kind's
    /// wrapper key, holding an object of declared properties.
    pub fn validate(&self, doc: &Value) -> Result<(), SchemaViolation> {
        let key = self.kind.args_key();

        let root = doc
            .as_object()
            .ok_or_else(|| SchemaViolation::new("", "type", "document must be an object"))?;
        if let Some(other) = root.keys().find(|k| k.as_str() != key) {
            return Err(SchemaViolation::new(
                pointer(&[other.as_str()]),
                "additionalProperties",
                format!("unexpected key {:?}, only {:?} is allowed", other, key),
            ));
        }
        let args = root
            .get(key)
            .ok_or_else(|| SchemaViolation::new("", "required", format!("missing {:?}", key)))?;

        let base = pointer(&[key]);
        let args = args
            .as_object()
            .ok_or_else(|| SchemaViolation::new(&base, "type", format!("{} must be an object", key)))?;

        if let Some(unknown) = args.keys().find(|k| self.property(k).is_none()) {
            return Err(SchemaViolation::new(
                pointer(&[key, unknown.as_str()]),
                "additionalProperties",
                format!("unknown property {:?}", unknown),
            ));
        }

        for prop in &self.properties {
            match args.get(prop.name) {
                Some(value) => prop.check(&pointer(&[key, prop.name]), value)?,
                None if prop.required => {
                    return Err(SchemaViolation::new(
                        &base,
                        "required",
                        format!("missing required property {:?}", prop.name),
                    ))
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Render as a JSON Schema (draft 2020-12) document.
    pub fn to_json_schema(&self) -> Value {
        let key = self.kind.args_key();
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name.to_string(), p.to_json()))
            .collect();
        let required: Vec<&str> = self
            .properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "$schema": JSON_SCHEMA_DIALECT,
            "title": format!("{} arguments", self.kind),
            "type": "object",
            "properties": {
                key: {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                    "additionalProperties": false,
                }
            },
            "required": [key],
            "additionalProperties": false,
        })
    }
}

/// Build an RFC 6901 JSON pointer from unescaped tokens.
fn pointer(tokens: &[&str]) -> String {
    tokens
        .iter()
        .map(|t| format!("/{}", t.replace('~', "~0").replace('/', "~1")))
        .collect()
}
