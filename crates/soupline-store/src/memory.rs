use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::Backend;

/// In-memory, HashMap-based backend.
///
/// Intended for tests and embedding. Values are held behind a `RwLock` and
/// cloned on read. The write counter lets tests observe exactly when the
/// record store persisted something.
pub struct MemoryBackend {
    blobs: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Create a backend pre-populated with the given blobs.
    pub fn with_blobs<I, K, V>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let backend = Self::new();
        {
            let mut map = backend.blobs.write().expect("lock poisoned");
            for (k, v) in blobs {
                map.insert(k.into(), v.into());
            }
        }
        backend
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total number of successful `put` calls since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Sorted list of stored keys.
    pub fn keys(&self) -> Vec<String> {
        let map = self.blobs.read().expect("lock poisoned");
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Remove everything.
    pub fn clear(&self) {
        self.blobs.write().expect("lock poisoned").clear();
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut map = self.blobs.write().expect("lock poisoned");
        map.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut map = self.blobs.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("key_count", &self.len())
            .field("writes", &self.write_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn get_missing_returns_none() {
        let backend = MemoryBackend::new();
        assert!(backend.get("donors").unwrap().is_none());
    }

    #[test]
    fn put_then_get() {
        let backend = MemoryBackend::new();
        backend.put("donors", "[]").unwrap();
        assert_eq!(backend.get("donors").unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn put_replaces_value() {
        let backend = MemoryBackend::new();
        backend.put("k", "one").unwrap();
        backend.put("k", "two").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.write_count(), 2);
    }

    #[test]
    fn remove_reports_presence() {
        let backend = MemoryBackend::new();
        backend.put("k", "v").unwrap();
        assert!(backend.remove("k").unwrap());
        assert!(!backend.remove("k").unwrap());
        assert!(backend.is_empty());
    }

    #[test]
    fn with_blobs_and_keys_sorted() {
        let backend = MemoryBackend::with_blobs([("b", "2"), ("a", "1")]);
        assert_eq!(backend.keys(), vec!["a".to_string(), "b".to_string()]);
        // Seeding does not count as a write.
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn shared_through_arc() {
        let backend = Arc::new(MemoryBackend::new());
        let handle: Box<dyn Backend> = Box::new(Arc::clone(&backend));
        handle.put("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn clear_removes_all() {
        let backend = MemoryBackend::with_blobs([("a", "1"), ("b", "2")]);
        backend.clear();
        assert!(backend.is_empty());
    }

    #[test]
    fn debug_format() {
        let backend = MemoryBackend::new();
        let debug = format!("{backend:?}");
        assert!(debug.contains("MemoryBackend"));
        assert!(debug.contains("key_count"));
    }
}
