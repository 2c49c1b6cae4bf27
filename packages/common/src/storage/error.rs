use thiserror::Error;

/// Errors that can occur during object storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No object is stored under the requested key.
    #[error("object not found: {0}")]
    NotFound(String),
    /// The key is not a single safe path component.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The remote backend rejected or failed the request.
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("storage misconfigured: {0}")]
    Config(String),
}
