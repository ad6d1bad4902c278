//! Attribute parsing for the ProtoMessage derive macro

use darling::{FromDeriveInput, FromField};
use syn::{DeriveInput, Expr, Ident, Path, Type, Visibility};

/// Parsed #[proto(...)] attributes on the struct
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(proto), supports(struct_named))]
pub struct ProtoClassArgs {
    /// Struct identifier
    pub ident: Ident,

    /// Struct visibility
    pub vis: Visibility,

    /// Struct fields
    pub data: darling::ast::Data<(), ProtoFieldArgs>,

    /// Explicit wire-level schema name; defaults to the struct identifier
    #[darling(default)]
    pub name: Option<String>,

    /// Parent message type whose field declarations are inherited
    #[darling(default)]
    pub extends: Option<Path>,
}

/// Parsed #[proto(...)] attributes on a field
#[derive(Debug, FromField)]
#[darling(attributes(proto))]
pub struct ProtoFieldArgs {
    /// Field identifier
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Field visibility
    pub vis: Visibility,

    /// Numeric field id
    /// If not specified, this is not a proto field (e.g., the raw field)
    #[darling(default)]
    pub id: Option<u32>,

    /// Wire type tag (defaults to "bytes")
    #[darling(default)]
    pub wire_type: Option<String>,

    /// Wire-level field name override (defaults to the field identifier)
    #[darling(default)]
    pub name: Option<String>,

    /// Field must be present exactly once
    #[darling(default)]
    pub required: bool,

    /// Field may repeat
    #[darling(default)]
    pub repeated: bool,

    /// Default value expression, compiled into the getter
    #[darling(default)]
    pub default: Option<Expr>,

    /// Path to a `WireConverter` value carried as field metadata
    #[darling(default)]
    pub converter: Option<Path>,

    /// Nested message type constructed as the field's default
    #[darling(default)]
    pub parser: Option<Path>,
}

impl ProtoFieldArgs {
    /// Check if this is a proto field (has an id attribute)
    pub fn is_proto_field(&self) -> bool {
        self.id.is_some()
    }

    /// Check if this is the raw cache field
    pub fn is_raw_field(&self) -> bool {
        self.ident.as_ref().map(|i| i == "raw").unwrap_or(false)
    }
}

/// Parse a DeriveInput into ProtoClassArgs
pub fn parse_proto_message(input: &DeriveInput) -> darling::Result<ProtoClassArgs> {
    ProtoClassArgs::from_derive_input(input)
}
