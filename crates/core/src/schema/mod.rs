//! Schema system - declarative wire-schema metadata for message classes
//!
//! This module turns per-field declarations into the ordered wire-schema
//! descriptor the protobuf codec consumes, and tracks the per-class
//! metadata behind it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Declarations                            │
//! │  #[derive(ProtoMessage)] attrs   TOML SchemaConfig          │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │ declare_field(key, FieldOptions)
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SchemaBuilder                                              │
//! │    TableState::Inherited(Arc) ──copy on first own decl──►   │
//! │    TableState::Owned(FieldTable)                            │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │ finalize()
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ClassSchema { local_name, items, descriptor }              │
//! │    descriptor: protoclass_codec::MessageSchema              │
//! │    published in the global registry by local name           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use protoclass_core::schema::{FieldOptions, SchemaBuilder};
//!
//! let mut builder = SchemaBuilder::named("Greeting");
//! let mut text = FieldOptions::new(1);
//! text.wire_type = Some("string".into());
//! builder.declare_field("text", text);
//!
//! let schema = builder.finalize().unwrap();
//! assert_eq!(schema.descriptor().get("text").unwrap().id, 1);
//! ```
//!
//! Construction is single-threaded and synchronous: a schema is built
//! once, at the moment the class is declared, never concurrently with
//! instance use.

pub mod builder;
pub mod config;
pub mod decl;
pub mod registry;
pub mod table;

// Re-export primary types
pub use builder::{ClassSchema, SchemaBuilder, SchemaError};
pub use config::{ConfigError, FieldConfig, SchemaConfig};
pub use decl::{DefaultValue, FieldDeclaration, FieldOptions, NestedRef, WireConverter};
pub use registry::{clear_all, is_registered, lookup, register, schema_count};
pub use table::{FieldTable, TableState};

use crate::message::RawCache;

/// Trait for message types carrying a wire schema
///
/// This trait is implemented by the `#[derive(ProtoMessage)]` macro and
/// gives the codec a uniform way to reach a type's schema and an
/// instance's cached encoded form.
pub trait ProtoMessage {
    /// The type's finalized schema, built on first access
    fn class_schema() -> &'static ClassSchema
    where
        Self: Sized;

    /// Wire-level schema name
    fn local_name(&self) -> &'static str
    where
        Self: Sized,
    {
        Self::class_schema().local_name()
    }

    /// The instance's cached encoded form
    fn raw_cache(&self) -> &RawCache;

    /// Mutable access to the cached encoded form
    fn raw_cache_mut(&mut self) -> &mut RawCache;
}
