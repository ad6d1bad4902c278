//! The wire schema container
//!
//! A [`MessageSchema`] is the codec's in-memory description of one message
//! type: an ordered list of field descriptors under a schema name. The
//! codec walks it to encode and decode instances of that type.

use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;

/// Violation of the container's own registration rules.
///
/// The container enforces only what it cannot function without: ids and
/// wire names must be unique within one schema. Everything else (wire type
/// spelling, rule combinations) is accepted as-is.
#[derive(Debug, thiserror::Error)]
pub enum SchemaViolation {
    /// Two fields registered with the same numeric id
    #[error("duplicate field id {id} in schema '{schema}'")]
    DuplicateFieldId { schema: String, id: u32 },

    /// Two fields registered with the same wire name
    #[error("duplicate field name '{name}' in schema '{schema}'")]
    DuplicateFieldName { schema: String, name: String },
}

/// An ordered wire schema for one message type.
///
/// Fields are kept in registration order; the codec relies on that order
/// when emitting deterministic output.
///
/// # Example
///
/// ```
/// use protoclass_codec::{wire_type, FieldDescriptor, MessageSchema, Rule};
///
/// let mut schema = MessageSchema::new("Envelope");
/// schema.add(FieldDescriptor::new("id", 1, wire_type::UINT32, Some(Rule::Required)))?;
/// schema.add(FieldDescriptor::new("payload", 2, wire_type::BYTES, None))?;
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.get("payload").unwrap().id, 2);
/// # Ok::<(), protoclass_codec::SchemaViolation>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageSchema {
    /// Create an empty schema with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a field descriptor
    ///
    /// Fields are appended in registration order. Registration fails if the
    /// field's id or wire name collides with an already registered field.
    pub fn add(&mut self, field: FieldDescriptor) -> Result<(), SchemaViolation> {
        if self.fields.iter().any(|f| f.id == field.id) {
            return Err(SchemaViolation::DuplicateFieldId {
                schema: self.name.clone(),
                id: field.id,
            });
        }
        if self.fields.iter().any(|f| f.name == field.name) {
            return Err(SchemaViolation::DuplicateFieldName {
                schema: self.name.clone(),
                name: field.name,
            });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Look up a field by wire name
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field by numeric id
    pub fn field_by_id(&self, id: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Iterate fields in registration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Number of registered fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
