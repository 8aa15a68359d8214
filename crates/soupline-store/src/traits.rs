use std::sync::Arc;

use crate::error::StoreResult;

/// Key-value blob storage that the record store persists into.
///
/// Each record collection is written as one text blob under its own key.
/// Implementations must satisfy these rules:
/// - `get` on a key that was never written returns `Ok(None)`.
/// - `put` replaces the previous value for the key in full.
/// - Writes are synchronous: once `put` returns `Ok`, a later `get` (also
///   after a restart, for durable backends) observes the value.
/// - I/O errors are returned, never silently ignored.
pub trait Backend: Send + Sync {
    /// Read the blob stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Returns `true` if it existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }
}
