//! Session-scoped biography cache.
//!
//! The cache itself is a thin namespacing layer over an injected key/value
//! capability ([`SessionStore`]). The store's lifetime is the browsing
//! session; nothing here expires entries or persists beyond it. Only
//! successfully fetched, truncated text is ever written: error and
//! placeholder states never reach the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Prefix applied to every cache key, matching the key scheme the site's
/// session storage already uses for biographies.
const CACHE_KEY_PREFIX: &str = "wikipedia_bio_";

/// Session-scoped key/value capability.
///
/// Implementations own the lifetime semantics (cleared at session end).
/// There is deliberately no remove or clear: the key space is append-only
/// with last-writer-wins on a given key.
pub trait SessionStore: Send + Sync {
    /// Returns the stored value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores a value under a key, replacing any previous value.
    fn put(&self, key: &str, value: &str);
}

/// In-memory [`SessionStore`] whose lifetime is the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

/// Namespaced biography cache over a session store.
///
/// Keys are derived from the author's remote summary identifier and
/// prefixed so they cannot collide with unrelated cached data sharing the
/// same session store.
#[derive(Clone)]
pub struct BioCache {
    store: Arc<dyn SessionStore>,
}

impl BioCache {
    /// Creates a cache over the given session store.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Creates a cache over a fresh in-memory session store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Derives the namespaced cache key for a summary identifier.
    #[must_use]
    pub fn cache_key(page_id: &str) -> String {
        format!("{CACHE_KEY_PREFIX}{page_id}")
    }

    /// Returns the cached biography for a summary identifier, if present.
    #[must_use]
    pub fn get(&self, page_id: &str) -> Option<String> {
        let cached = self.store.get(&Self::cache_key(page_id));
        if cached.is_some() {
            tracing::debug!(page_id, "biography cache hit");
        }
        cached
    }

    /// Stores a truncated biography under the summary identifier's key.
    pub fn put(&self, page_id: &str, text: &str) {
        self.store.put(&Self::cache_key(page_id), text);
    }
}

impl std::fmt::Debug for BioCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BioCache").finish_non_exhaustive()
    }
}
