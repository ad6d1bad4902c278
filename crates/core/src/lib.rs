//! protoclass - declarative protobuf schema metadata
//!
//! This crate derives two things from a message type's declarative
//! metadata: the ordered wire-schema descriptor handed to the protobuf
//! codec, and instrumented field accessors with lazy defaults and
//! encoded-form cache invalidation.
//!
//! # Re-exports
//!
//! This crate re-exports the codec boundary crate for convenience:
//! - [`codec`] - Wire-schema container types consumed by the codec
//!
//! # Example
//!
//! ```
//! use protoclass_core::message::{FieldSlot, RawCache};
//! use protoclass_core::ProtoMessage;
//!
//! #[derive(Default, ProtoMessage)]
//! #[proto(name = "Envelope")]
//! struct Envelope {
//!     raw: RawCache,
//!
//!     #[proto(id = 1, wire_type = "uint32", required, default = 0u32)]
//!     id: FieldSlot<u32>,
//!
//!     #[proto(id = 2)]
//!     payload: FieldSlot<Vec<u8>>,
//! }
//!
//! let schema = Envelope::class_schema();
//! assert_eq!(schema.local_name(), "Envelope");
//! assert_eq!(schema.descriptor().len(), 2);
//! ```

// Allow the crate to refer to itself as `protoclass_core` for proc macro compatibility
extern crate self as protoclass_core;

// Re-export the codec boundary crate
pub use protoclass_codec as codec;

pub mod message;
pub mod schema;

// Re-export commonly used items
pub use message::{FieldSlot, RawCache};
pub use schema::{
    is_registered, lookup, schema_count, ClassSchema, ConfigError, DefaultValue, FieldDeclaration,
    FieldOptions, FieldTable, NestedRef, ProtoMessage, SchemaBuilder, SchemaConfig, SchemaError,
    WireConverter,
};

// Re-export macros
pub use protoclass_macros::ProtoMessage;
