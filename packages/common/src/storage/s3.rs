use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use super::config::S3Config;
use super::error::StorageError;
use super::key::StorageKey;
use super::traits::ObjectStore;

/// Object store backed by one bucket of an S3-compatible service.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
}

impl S3ObjectStore {
    pub fn new(config: &S3Config, bucket_name: &str) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };
        let credentials = Credentials::new(
            Some(config.access_key.as_str()),
            Some(config.secret_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(format!("invalid S3 credentials: {e}")))?;

        let mut bucket = Bucket::new(bucket_name, region, credentials)
            .map_err(|e| StorageError::Config(format!("invalid S3 bucket: {e}")))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }
        Ok(Self { bucket })
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn backend_error(op: &str, key: &StorageKey, err: S3Error) -> StorageError {
    StorageError::Backend(format!("{op} {key} failed: {err}"))
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &StorageKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let response = self
            .bucket
            .put_object_with_content_type(key.as_str(), data, content_type)
            .await
            .map_err(|e| backend_error("put", key, e))?;
        if !is_success(response.status_code()) {
            return Err(StorageError::Backend(format!(
                "put {key} returned status {}",
                response.status_code()
            )));
        }
        Ok(())
    }

    async fn get(&self, key: &StorageKey) -> Result<Vec<u8>, StorageError> {
        match self.bucket.get_object(key.as_str()).await {
            Ok(response) if response.status_code() == 404 => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Ok(response) if !is_success(response.status_code()) => Err(StorageError::Backend(
                format!("get {key} returned status {}", response.status_code()),
            )),
            Ok(response) => Ok(response.bytes().to_vec()),
            Err(S3Error::HttpFailWithBody(404, _)) => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(backend_error("get", key, e)),
        }
    }

    async fn delete(&self, key: &StorageKey) -> Result<bool, StorageError> {
        let response = self
            .bucket
            .delete_object(key.as_str())
            .await
            .map_err(|e| backend_error("delete", key, e))?;
        if !is_success(response.status_code()) {
            return Err(StorageError::Backend(format!(
                "delete {key} returned status {}",
                response.status_code()
            )));
        }
        // S3 answers 204 whether or not the object existed.
        Ok(true)
    }

    fn location(&self, key: &StorageKey) -> String {
        format!("/{}/{}", self.bucket.name(), key)
    }
}
