use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::error::StorageError;
use super::key::StorageKey;
use super::traits::ObjectStore;

/// Filesystem-backed object store.
///
/// Objects live flat under the root directory as `{root}/{key}`. Writes go to
/// `{root}/.tmp` first and are renamed into place.
pub struct FilesystemObjectStore {
    root: PathBuf,
}

impl FilesystemObjectStore {
    /// Create the store, creating (and canonicalizing) its root directory.
    pub async fn new(root: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        let root = fs::canonicalize(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &StorageKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    fn temp_path(&self) -> PathBuf {
        self.root
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Resolve an existing object, refusing anything that escapes the root
    /// once symlinks and relative components are resolved.
    async fn resolve_existing(&self, key: &StorageKey) -> Result<PathBuf, StorageError> {
        let resolved = match fs::canonicalize(self.object_path(key)).await {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if !resolved.starts_with(&self.root) {
            return Err(StorageError::InvalidKey(format!(
                "{key} resolves outside the storage root"
            )));
        }
        Ok(resolved)
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn put(
        &self,
        key: &StorageKey,
        data: &[u8],
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await?;
        let written = async {
            file.write_all(data).await?;
            file.flush().await
        }
        .await;
        drop(file);
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, self.object_path(key)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn get(&self, key: &StorageKey) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve_existing(key).await?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &StorageKey) -> Result<bool, StorageError> {
        match fs::remove_file(self.object_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self, key: &StorageKey) -> String {
        self.object_path(key).display().to_string()
    }
}
