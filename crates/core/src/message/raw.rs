//! Per-instance cache of the encoded wire form

use tracing::trace;

/// Cached encoded form of a message instance.
///
/// The codec stores the bytes it produced for an instance here; any field
/// write that actually changes a value invalidates the cache so the stale
/// bytes are never reused. This type only tracks validity; it never
/// recomputes anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCache {
    bytes: Option<Vec<u8>>,
}

impl RawCache {
    /// Create an empty (invalid) cache
    pub const fn empty() -> Self {
        Self { bytes: None }
    }

    /// Store a freshly encoded form
    pub fn store(&mut self, bytes: Vec<u8>) {
        self.bytes = Some(bytes);
    }

    /// The cached bytes, if still valid
    pub fn get(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Drop the cached form.
    ///
    /// Idempotent; called by generated setters whenever a field value
    /// changes.
    pub fn invalidate(&mut self) {
        if self.bytes.take().is_some() {
            trace!("raw cache invalidated");
        }
    }

    /// Whether a cached form is present
    pub fn is_valid(&self) -> bool {
        self.bytes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_invalid() {
        let cache = RawCache::empty();
        assert!(!cache.is_valid());
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_store_and_invalidate() {
        let mut cache = RawCache::empty();
        cache.store(vec![1, 2, 3]);
        assert!(cache.is_valid());
        assert_eq!(cache.get(), Some(&[1u8, 2, 3][..]));

        cache.invalidate();
        assert!(!cache.is_valid());
        assert!(cache.get().is_none());

        // Invalidating again is harmless
        cache.invalidate();
        assert!(!cache.is_valid());
    }
}
