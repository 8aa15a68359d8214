/// Errors from record store and backend operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A persisted collection exists but cannot be decoded.
    #[error("corrupt collection {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Serialization failure while saving a collection.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected the key.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend-specific failure that is not an I/O error.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
