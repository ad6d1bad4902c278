//! protoclass codec boundary - wire schema container types
//!
//! This crate declares the schema-container surface of the protobuf codec:
//! the in-memory description of a message type that drives binary
//! encode/decode. The encode/decode algorithms themselves (varints, wire
//! type semantics, message traversal) live in the codec proper and are not
//! part of this crate.
//!
//! # Modules
//!
//! - [`field`] - Field descriptors, rule tokens, wire type tags
//! - [`schema`] - The [`MessageSchema`] container and its registration rules
//!
//! [`MessageSchema`]: schema::MessageSchema

pub mod field;
pub mod schema;

pub use field::{wire_type, FieldDescriptor, Rule};
pub use schema::{MessageSchema, SchemaViolation};
