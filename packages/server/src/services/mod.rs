pub mod avatar;
pub mod content;
pub mod media;

use common::storage::{ObjectStore, StorageKey};

use crate::error::AppError;

/// A file received from a multipart upload.
pub struct UploadedFile {
    pub original_filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Declared MIME type without parameters, lowercased.
    pub fn mime_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty())
    }
}

/// Read a stored object by a client-supplied key.
pub async fn fetch_object(
    store: &dyn ObjectStore,
    raw_key: &str,
) -> Result<(StorageKey, Vec<u8>), AppError> {
    let key = StorageKey::parse(raw_key)?;
    let data = store.get(&key).await?;
    Ok((key, data))
}
