//! protoclass proc macros
//!
//! This crate provides the derive macro for the protoclass schema system:
//!
//! - `#[derive(ProtoMessage)]` - Generate a wire schema and instrumented
//!   field accessors from declarative metadata
//!
//! # Example
//!
//! ```ignore
//! use protoclass_core::message::{FieldSlot, RawCache};
//! use protoclass_core::ProtoMessage;
//!
//! #[derive(Default, ProtoMessage)]
//! #[proto(name = "Person")]
//! pub struct Person {
//!     raw: RawCache,
//!
//!     #[proto(id = 1, wire_type = "string", default = String::new())]
//!     name: FieldSlot<String>,
//!
//!     #[proto(id = 2, wire_type = "string", repeated, default = Vec::new())]
//!     emails: FieldSlot<Vec<String>>,
//!
//!     #[proto(id = 3)]
//!     avatar: FieldSlot<Vec<u8>>,
//! }
//!
//! // Generated methods allow instrumented access:
//! // - person.name() -> &String (lazily initialized to the default)
//! // - person.set_name(value) - invalidates person.raw when the value changes
//! // - person.avatar() -> Option<&Vec<u8>> (no declared default)
//! // Person::class_schema() builds and registers the wire schema once.
//! ```
//!
//! # Attributes
//!
//! ## Struct Attributes
//!
//! - `#[proto(name = "WireName")]` - Optional. Explicit wire-level schema
//!   name; defaults to the struct identifier.
//! - `#[proto(extends = Parent)]` - Optional. Inherit the parent message
//!   type's field declarations.
//!
//! ## Field Attributes
//!
//! - `#[proto(id = N)]` - **Required** on proto fields. The numeric field id.
//! - `#[proto(wire_type = "uint32")]` - Wire type tag (default: `"bytes"`).
//! - `#[proto(name = "wireName")]` - Wire-level field name override.
//! - `#[proto(required)]` / `#[proto(repeated)]` - Cardinality flags.
//! - `#[proto(default = <expr>)]` - Default value computed on first read.
//! - `#[proto(converter = PATH)]` - `WireConverter` carried as metadata.
//! - `#[proto(parser = Type)]` - Nested message type; non-repeated fields
//!   default to an empty instance of it.
//!
//! Proto fields must have type `FieldSlot<T>` with `T: PartialEq` (and
//! `T: Default` for `parser` fields); the struct itself must carry a
//! `raw: RawCache` field.

mod parse;
mod proto_message;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for message types carrying a wire schema
///
/// Generates the `ProtoMessage` trait implementation (building and
/// registering the type's schema once, on first access) plus one
/// getter/setter pair per declared field with lazy defaulting and
/// raw-cache invalidation.
///
/// # Example
///
/// ```ignore
/// use protoclass_core::message::{FieldSlot, RawCache};
/// use protoclass_core::ProtoMessage;
///
/// #[derive(Default, ProtoMessage)]
/// pub struct Envelope {
///     raw: RawCache,
///
///     #[proto(id = 1, wire_type = "uint32", required, default = 0u32)]
///     id: FieldSlot<u32>,
///
///     #[proto(id = 2)]
///     payload: FieldSlot<Vec<u8>>,
/// }
/// ```
///
/// # Generated Code
///
/// For each proto field, the macro generates:
///
/// - A getter (`fn id(&mut self) -> &u32`, or `Option<&T>` when the field
///   has no default)
/// - A setter (`fn set_id(&mut self, value: u32)`) that invalidates the
///   `raw` cache only when the value actually changes
///
/// For the struct:
///
/// - `const LOCAL_NAME: &'static str` - the wire-level schema name
/// - An `impl ProtoMessage` whose `class_schema()` runs the schema builder
///   exactly once behind a `OnceLock`
#[proc_macro_derive(ProtoMessage, attributes(proto))]
pub fn derive_proto_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    proto_message::derive_proto_message(input).into()
}
