use std::path::PathBuf;

use serde::Deserialize;

/// Which backend stores uploaded bytes.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Filesystem,
    S3,
}

/// Separate object namespaces (directories or buckets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Media,
    Avatar,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemConfig {
    /// Directory for general media. Default: "./uploads/media".
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
    /// Directory for user avatars. Default: "./uploads/avatars".
    #[serde(default = "default_avatar_dir")]
    pub avatar_dir: PathBuf,
}

/// S3-compatible endpoint settings.
#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    /// Full endpoint URL, e.g. "https://s3.eu-central-1.amazonaws.com".
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub media_bucket: String,
    pub avatar_bucket: String,
    /// Use path-style addressing (needed by MinIO and most self-hosted stores).
    #[serde(default)]
    pub path_style: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub filesystem: FilesystemConfig,
    pub s3: Option<S3Config>,
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("./uploads/media")
}
fn default_avatar_dir() -> PathBuf {
    PathBuf::from("./uploads/avatars")
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
            avatar_dir: default_avatar_dir(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            filesystem: FilesystemConfig::default(),
            s3: None,
        }
    }
}
