//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Filesystem failure in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backend cannot address.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Slot was written by a newer schema than this reader understands.
    #[error("Schema mismatch for {key}: found version {found}, supported up to {supported}")]
    SchemaMismatch {
        key: String,
        found: u32,
        supported: u32,
    },
}

impl CacheError {
    /// Whether the stored bytes are unreadable, as opposed to the backend failing.
    ///
    /// Callers use this to decide whether starting over from empty state is safe.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            CacheError::SerializeError(_) | CacheError::SchemaMismatch { .. }
        )
    }
}
