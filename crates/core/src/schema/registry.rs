//! Global schema registry
//!
//! Finished schemas are published here under their local name when they
//! are finalized. The codec resolves nested message types by wire name
//! through this registry at decode time.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tracing::{debug, warn};

use super::builder::ClassSchema;

/// Global schema registry keyed by local name
static REGISTRY: LazyLock<DashMap<String, Arc<ClassSchema>>> = LazyLock::new(DashMap::new);

/// Publish a finalized schema under its local name.
///
/// Called by `SchemaBuilder::finalize`. Re-registering a name replaces the
/// previous entry (last wins).
pub fn register(schema: Arc<ClassSchema>) {
    let name = schema.local_name().to_string();
    if REGISTRY.insert(name.clone(), schema).is_some() {
        warn!("Schema {} re-registered, replacing previous entry", name);
    } else {
        debug!("Registered schema {}", name);
    }
}

/// Look up a schema by local name
pub fn lookup(name: &str) -> Option<Arc<ClassSchema>> {
    REGISTRY.get(name).map(|entry| Arc::clone(&entry))
}

/// Whether a schema is registered under the given name
pub fn is_registered(name: &str) -> bool {
    REGISTRY.contains_key(name)
}

/// Number of registered schemas
pub fn schema_count() -> usize {
    REGISTRY.len()
}

/// Remove every registered schema.
///
/// Use with caution - typically only needed for tests or full resets.
pub fn clear_all() {
    REGISTRY.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldOptions, SchemaBuilder};
    use std::sync::atomic::{AtomicU64, Ordering};

    // Generate unique schema names so parallel tests never collide
    static TEST_NAME_COUNTER: AtomicU64 = AtomicU64::new(1);

    fn unique_name(prefix: &str) -> String {
        format!("{}{}", prefix, TEST_NAME_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[test]
    fn test_finalize_registers() {
        let name = unique_name("Registered");
        assert!(!is_registered(&name));

        let schema = SchemaBuilder::named(&name).finalize().unwrap();
        assert!(is_registered(&name));

        let found = lookup(&name).unwrap();
        assert!(Arc::ptr_eq(&found, &schema));
    }

    #[test]
    fn test_lookup_missing() {
        assert!(lookup(&unique_name("NeverBuilt")).is_none());
    }

    #[test]
    fn test_reregistration_replaces() {
        let name = unique_name("Replaced");

        SchemaBuilder::named(&name).finalize().unwrap();

        let mut second = SchemaBuilder::named(&name);
        second.declare_field("x", FieldOptions::new(1));
        let second = second.finalize().unwrap();

        let found = lookup(&name).unwrap();
        assert!(Arc::ptr_eq(&found, &second));
        assert_eq!(found.items().len(), 1);
    }
}
