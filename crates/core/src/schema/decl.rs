//! Field declaration metadata
//!
//! One `FieldDeclaration` is produced per declared field by applying the
//! defaults of the declarative surface (`FieldOptions`) at declaration
//! time: the wire type falls back to `"bytes"` and the wire name falls
//! back to the field's own key.

use std::any;
use std::fmt;

use serde_json::Value;

use super::builder::ClassSchema;
use super::ProtoMessage;

/// Untyped default value carried in field metadata.
///
/// Generated code records literal defaults here for the codec; the typed
/// default used by the accessor itself is compiled into the getter.
pub type DefaultValue = Value;

/// Bidirectional transform between the stored and wire representation of a
/// field, applied by the codec on its wire side.
///
/// Carried as declarative metadata only; this layer never invokes either
/// direction.
#[derive(Clone, Copy)]
pub struct WireConverter {
    /// Display name used in diagnostics
    pub name: &'static str,
    /// Stored representation -> wire bytes
    pub to_wire: fn(&[u8]) -> Vec<u8>,
    /// Wire bytes -> stored representation
    pub from_wire: fn(&[u8]) -> Vec<u8>,
}

impl fmt::Debug for WireConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireConverter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for WireConverter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Reference to another message type carrying its own schema.
///
/// Used by the codec to resolve nested message fields, and by generated
/// getters to know that a fresh empty instance is the field's default.
/// Resolution is deferred until [`schema`] is called, so message types may
/// reference each other (or themselves) freely.
///
/// [`schema`]: NestedRef::schema
#[derive(Clone, Copy)]
pub struct NestedRef {
    type_path: &'static str,
    resolve: fn() -> &'static ClassSchema,
}

impl NestedRef {
    /// Reference the schema of a message type
    pub fn of<T: ProtoMessage>() -> Self {
        Self {
            type_path: any::type_name::<T>(),
            resolve: T::class_schema,
        }
    }

    /// Full type path of the referenced message type
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Resolve the referenced type's schema
    pub fn schema(&self) -> &'static ClassSchema {
        (self.resolve)()
    }
}

impl fmt::Debug for NestedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedRef").field(&self.type_path).finish()
    }
}

impl PartialEq for NestedRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_path == other.type_path
    }
}

/// The field-level declarative surface.
///
/// Everything except `id` is optional; unset options take their documented
/// defaults when the declaration is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOptions {
    /// Numeric field id (required, unique within the owning schema)
    pub id: u32,
    /// Wire type tag; defaults to `"bytes"`
    pub wire_type: Option<String>,
    /// Wire-level field name; defaults to the field's own key
    pub name: Option<String>,
    /// Field must be present exactly once
    pub required: bool,
    /// Field may repeat
    pub repeated: bool,
    /// Untyped default recorded for the codec
    pub default_value: Option<DefaultValue>,
    /// Stored/wire representation transform
    pub converter: Option<WireConverter>,
    /// Nested message type reference
    pub parser: Option<NestedRef>,
}

impl FieldOptions {
    /// Options for a field with the given id and all defaults
    pub fn new(id: u32) -> Self {
        Self {
            id,
            wire_type: None,
            name: None,
            required: false,
            repeated: false,
            default_value: None,
            converter: None,
            parser: None,
        }
    }
}

/// Finalized metadata for one declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    /// The field's own identifier (table key)
    pub key: String,
    /// Wire-level field name
    pub name: String,
    /// Numeric field id
    pub id: u32,
    /// Wire type tag
    pub wire_type: String,
    /// Field must be present exactly once
    pub required: bool,
    /// Field may repeat
    pub repeated: bool,
    /// Untyped default recorded for the codec
    pub default_value: Option<DefaultValue>,
    /// Stored/wire representation transform
    pub converter: Option<WireConverter>,
    /// Nested message type reference
    pub parser: Option<NestedRef>,
}

impl FieldDeclaration {
    /// Apply declaration-time defaults to a set of options
    pub fn from_options(key: impl Into<String>, options: FieldOptions) -> Self {
        let key = key.into();
        Self {
            name: options.name.unwrap_or_else(|| key.clone()),
            key,
            id: options.id,
            wire_type: options
                .wire_type
                .unwrap_or_else(|| protoclass_codec::wire_type::BYTES.to_string()),
            required: options.required,
            repeated: options.repeated,
            default_value: options.default_value,
            converter: options.converter,
            parser: options.parser,
        }
    }
}
