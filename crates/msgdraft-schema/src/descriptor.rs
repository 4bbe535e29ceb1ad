//! Field descriptors and message schemas
//!
//! The schema model consumed by the session core. Descriptors arrive from an
//! external schema source as read-only template data; the core clones them
//! before mutating any per-path bookkeeping.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Kind of a message field
///
/// Closed set, matched exhaustively at every consumer so a new field kind is
/// a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Leaf value (string, numeric, bool, enum, ...)
    Scalar,
    /// Nested message, resolved through the schema source
    Message,
    /// Mutually-exclusive variant group; exactly one option active at a time
    Oneof,
}

impl FieldKind {
    /// Lowercase tag, as it appears in descriptor payloads
    ///
    /// Also the fallback key into the default-value table.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Message => "message",
            Self::Oneof => "oneof",
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cardinality of a message field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRule {
    /// At most one value in the slot
    #[default]
    #[serde(alias = "optional")]
    Singular,
    /// The slot holds a sequence of values
    Repeated,
}

/// Metadata for one field of a message schema
///
/// `type_name` is the scalar type tag for [`FieldKind::Scalar`] fields and
/// the referenced message type name for [`FieldKind::Message`] fields.
/// `options` is populated only for [`FieldKind::Oneof`]; each option is
/// itself a field that can be activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field name, the path segment that addresses this field
    pub field_name: String,

    /// Field kind tag
    #[serde(rename = "fieldType")]
    pub kind: FieldKind,

    /// Declared type: scalar type tag or referenced message type name
    #[serde(rename = "type", default)]
    pub type_name: String,

    /// Singular or repeated
    #[serde(default)]
    pub rule: FieldRule,

    /// Activatable options of a oneof group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    /// Scalar field with the given type tag
    #[must_use]
    pub fn scalar(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            field_name: name.into(),
            kind: FieldKind::Scalar,
            type_name: type_name.into(),
            rule: FieldRule::Singular,
            options: Vec::new(),
        }
    }

    /// Nested message field referencing a schema by type name
    #[must_use]
    pub fn message(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            field_name: name.into(),
            kind: FieldKind::Message,
            type_name: type_name.into(),
            rule: FieldRule::Singular,
            options: Vec::new(),
        }
    }

    /// Oneof group with the given activatable options
    #[must_use]
    pub fn oneof(name: impl Into<String>, options: Vec<FieldDescriptor>) -> Self {
        Self {
            field_name: name.into(),
            kind: FieldKind::Oneof,
            type_name: String::new(),
            rule: FieldRule::Singular,
            options,
        }
    }

    /// Mark the field as repeated
    #[inline]
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.rule = FieldRule::Repeated;
        self
    }

    /// Check if the field is repeated
    #[inline]
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.rule == FieldRule::Repeated
    }

    /// Find a oneof option by name
    ///
    /// Empty for non-oneof fields, whose option list is always empty.
    #[inline]
    #[must_use]
    pub fn option_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.options.iter().find(|opt| opt.field_name == name)
    }

    /// Check whether a path segment name addresses this field
    ///
    /// A oneof is addressed through its option names, never through its own
    /// name; every other kind is addressed by its field name.
    #[must_use]
    pub fn matches_segment(&self, segment: &str) -> bool {
        match self.kind {
            FieldKind::Oneof => self.option_named(segment).is_some(),
            FieldKind::Scalar | FieldKind::Message => self.field_name == segment,
        }
    }
}

/// Named message type definition: an ordered collection of field descriptors
///
/// Obtained from the schema source and treated as an immutable template;
/// cache entries hold independent copies of `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSchema {
    /// Message type name, the key the schema source resolves
    pub name: String,

    /// Ordered field descriptors
    pub fields: Vec<FieldDescriptor>,
}

impl MessageSchema {
    /// Create a schema from a name and ordered fields
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Find a field by name
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn scalar_constructor() {
        let field = FieldDescriptor::scalar("pin", "string");
        assert_eq!(field.kind, FieldKind::Scalar);
        assert_eq!(field.type_name, "string");
        assert_eq!(field.rule, FieldRule::Singular);
        assert!(field.options.is_empty());
    }

    #[test]
    fn repeated_builder() {
        let field = FieldDescriptor::scalar("levels", "int32").repeated();
        assert!(field.is_repeated());
    }

    #[test]
    fn oneof_option_lookup() {
        let group = FieldDescriptor::oneof(
            "mode",
            vec![
                FieldDescriptor::scalar("auto", "bool"),
                FieldDescriptor::scalar("manual", "int32"),
            ],
        );
        assert_eq!(group.option_named("manual").unwrap().type_name, "int32");
        assert!(group.option_named("mode").is_none());
    }

    #[test]
    fn oneof_matches_through_options_only() {
        let group = FieldDescriptor::oneof("mode", vec![FieldDescriptor::scalar("auto", "bool")]);
        assert!(group.matches_segment("auto"));
        assert!(!group.matches_segment("mode"));

        let plain = FieldDescriptor::scalar("period", "float");
        assert!(plain.matches_segment("period"));
        assert!(!plain.matches_segment("auto"));
    }

    #[test]
    fn descriptor_deserializes_host_payload() {
        let field: FieldDescriptor = serde_json::from_value(json!({
            "fieldName": "pins",
            "fieldType": "message",
            "type": "Pin",
            "rule": "repeated",
        }))
        .unwrap();
        assert_eq!(field, FieldDescriptor::message("pins", "Pin").repeated());
    }

    #[test]
    fn descriptor_rule_defaults_to_singular() {
        let field: FieldDescriptor = serde_json::from_value(json!({
            "fieldName": "name",
            "fieldType": "scalar",
            "type": "string",
        }))
        .unwrap();
        assert_eq!(field.rule, FieldRule::Singular);
    }

    #[test]
    fn descriptor_accepts_optional_rule_alias() {
        let field: FieldDescriptor = serde_json::from_value(json!({
            "fieldName": "name",
            "fieldType": "scalar",
            "type": "string",
            "rule": "optional",
        }))
        .unwrap();
        assert_eq!(field.rule, FieldRule::Singular);
    }

    #[test]
    fn oneof_roundtrips_with_options() {
        let group = FieldDescriptor::oneof(
            "output",
            vec![
                FieldDescriptor::scalar("digital", "bool"),
                FieldDescriptor::message("pwm", "PwmConfig"),
            ],
        );
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value["fieldType"], "oneof");
        assert_eq!(value["options"][1]["type"], "PwmConfig");
        let back: FieldDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(back, group);
    }

    #[test]
    fn schema_field_lookup() {
        let schema = MessageSchema::new(
            "Pin",
            vec![
                FieldDescriptor::scalar("name", "string"),
                FieldDescriptor::scalar("mode", "enum"),
            ],
        );
        assert_eq!(schema.len(), 2);
        assert!(schema.field("mode").is_some());
        assert!(schema.field("missing").is_none());
    }
}
