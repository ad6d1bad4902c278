//! Field descriptors and wire-level tags

use serde::{Deserialize, Serialize};

/// Wire cardinality marker for a field.
///
/// An optional field has no rule token at all, which is why descriptors
/// carry `Option<Rule>` rather than a three-variant enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Field must be present exactly once
    Required,
    /// Field may be present any number of times
    Repeated,
}

impl Rule {
    /// The rule token as it appears in schema text
    pub const fn as_str(self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Repeated => "repeated",
        }
    }
}

/// Well-known wire type tags.
///
/// Wire types are passed through to the codec as plain string tags and are
/// never validated by the schema layer; these constants cover the common
/// ones.
pub mod wire_type {
    /// Length-delimited byte payload (the default)
    pub const BYTES: &str = "bytes";
    /// UTF-8 string payload
    pub const STRING: &str = "string";
    /// Boolean varint
    pub const BOOL: &str = "bool";
    /// Unsigned 32-bit varint
    pub const UINT32: &str = "uint32";
    /// Unsigned 64-bit varint
    pub const UINT64: &str = "uint64";
    /// Signed 32-bit varint
    pub const INT32: &str = "int32";
    /// Signed 64-bit varint
    pub const INT64: &str = "int64";
    /// 32-bit float
    pub const FLOAT: &str = "float";
    /// 64-bit float
    pub const DOUBLE: &str = "double";
}

/// One registered field of a [`MessageSchema`].
///
/// Carries exactly what the codec needs to place the field on the wire:
/// wire name, numeric id, wire type tag, and the optional rule token.
///
/// [`MessageSchema`]: crate::schema::MessageSchema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Wire-level field name
    pub name: String,
    /// Numeric field id, unique within the owning schema
    pub id: u32,
    /// Wire type tag (e.g. `"bytes"`, `"uint32"`)
    pub wire_type: String,
    /// Cardinality rule; `None` means optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

impl FieldDescriptor {
    /// Create a field descriptor
    ///
    /// # Arguments
    /// * `name` - Wire-level field name
    /// * `id` - Numeric field id
    /// * `wire_type` - Wire type tag
    /// * `rule` - Cardinality rule, or `None` for optional
    pub fn new(
        name: impl Into<String>,
        id: u32,
        wire_type: impl Into<String>,
        rule: Option<Rule>,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            wire_type: wire_type.into(),
            rule,
        }
    }

    /// Whether this field is repeated
    pub fn is_repeated(&self) -> bool {
        self.rule == Some(Rule::Repeated)
    }

    /// Whether this field is required
    pub fn is_required(&self) -> bool {
        self.rule == Some(Rule::Required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_tokens() {
        assert_eq!(Rule::Required.as_str(), "required");
        assert_eq!(Rule::Repeated.as_str(), "repeated");
    }

    #[test]
    fn test_descriptor_construction() {
        let field = FieldDescriptor::new("payload", 1, wire_type::BYTES, None);
        assert_eq!(field.name, "payload");
        assert_eq!(field.id, 1);
        assert_eq!(field.wire_type, "bytes");
        assert!(field.rule.is_none());
        assert!(!field.is_repeated());
        assert!(!field.is_required());
    }

    #[test]
    fn test_descriptor_serialization_omits_absent_rule() {
        let optional = FieldDescriptor::new("a", 1, wire_type::UINT32, None);
        let json = serde_json::to_string(&optional).unwrap();
        assert!(!json.contains("rule"));

        let repeated = FieldDescriptor::new("b", 2, wire_type::BYTES, Some(Rule::Repeated));
        let json = serde_json::to_string(&repeated).unwrap();
        assert!(json.contains("\"rule\":\"repeated\""));
    }
}
