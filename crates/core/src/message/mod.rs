//! Message instance runtime
//!
//! Per-instance state behind the generated accessors: one [`FieldSlot`]
//! per declared field (filled lazily with the field's default on first
//! read) and one [`RawCache`] holding the last encoded form, invalidated
//! whenever a field value actually changes.
//!
//! # Usage
//!
//! ```
//! use protoclass_core::message::{FieldSlot, RawCache};
//! use protoclass_core::ProtoMessage;
//!
//! #[derive(Default, ProtoMessage)]
//! #[proto(name = "Greeting")]
//! struct Greeting {
//!     raw: RawCache,
//!
//!     #[proto(id = 1, wire_type = "string", default = String::new())]
//!     text: FieldSlot<String>,
//! }
//!
//! let mut greeting = Greeting::default();
//! assert_eq!(greeting.text(), "");
//!
//! greeting.raw.store(vec![0x0a, 0x00]);
//! greeting.set_text("hello".to_string());
//! assert!(!greeting.raw.is_valid());
//! ```

pub mod raw;
pub mod slot;

pub use raw::RawCache;
pub use slot::FieldSlot;
