use async_trait::async_trait;

use super::error::StorageError;
use super::key::StorageKey;

/// Key-addressed object storage shared by media and avatar uploads.
///
/// Implementations are chosen once at startup; callers never inspect which
/// backend they hold.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any previous object.
    async fn put(&self, key: &StorageKey, data: &[u8], content_type: &str)
    -> Result<(), StorageError>;

    /// Retrieve all bytes stored under `key`.
    ///
    /// Returns [`StorageError::NotFound`] when nothing is stored there.
    async fn get(&self, key: &StorageKey) -> Result<Vec<u8>, StorageError>;

    /// Delete the object under `key`.
    ///
    /// Returns `true` if an object was removed, `false` if the backend knows
    /// it did not exist. Backends that cannot tell report `true`.
    async fn delete(&self, key: &StorageKey) -> Result<bool, StorageError>;

    /// Backend-specific location string recorded alongside metadata rows.
    fn location(&self, key: &StorageKey) -> String;
}
