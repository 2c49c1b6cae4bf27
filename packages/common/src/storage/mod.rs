mod config;
mod error;
mod key;
mod traits;

pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3;

use std::sync::Arc;

pub use config::{FilesystemConfig, Namespace, S3Config, StorageBackend, StorageConfig};
pub use error::StorageError;
pub use key::StorageKey;
pub use traits::ObjectStore;

/// Build the object store for one namespace from configuration.
///
/// This is the only place that looks at which backend is configured.
pub async fn build_store(
    config: &StorageConfig,
    namespace: Namespace,
) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        StorageBackend::Filesystem => {
            let root = match namespace {
                Namespace::Media => config.filesystem.media_dir.clone(),
                Namespace::Avatar => config.filesystem.avatar_dir.clone(),
            };
            let store = filesystem::FilesystemObjectStore::new(root).await?;
            tracing::info!(?namespace, root = %store.root().display(), "Using filesystem storage");
            Ok(Arc::new(store))
        }
        StorageBackend::S3 => build_s3_store(config, namespace),
    }
}

#[cfg(feature = "object-storage")]
fn build_s3_store(
    config: &StorageConfig,
    namespace: Namespace,
) -> Result<Arc<dyn ObjectStore>, StorageError> {
    let s3_config = config
        .s3
        .as_ref()
        .ok_or_else(|| StorageError::Config("storage.s3 section is required".into()))?;
    let bucket = match namespace {
        Namespace::Media => &s3_config.media_bucket,
        Namespace::Avatar => &s3_config.avatar_bucket,
    };
    let store = self::s3::S3ObjectStore::new(s3_config, bucket)?;
    tracing::info!(?namespace, bucket = %bucket, endpoint = %s3_config.endpoint, "Using S3 storage");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "object-storage"))]
fn build_s3_store(
    _config: &StorageConfig,
    _namespace: Namespace,
) -> Result<Arc<dyn ObjectStore>, StorageError> {
    Err(StorageError::Config(
        "S3 backend requires the `object-storage` feature".into(),
    ))
}
