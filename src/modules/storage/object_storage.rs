//! Storage gateway contract
//!
//! The batch orchestrator only talks to storage through [`ObjectStorage`],
//! so any backend that can put and delete objects can sit behind it.

use async_trait::async_trait;
use thiserror::Error;

/// Access level requested for an uploaded object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Readable by anyone through its public URL
    PublicRead,
    /// Readable only with bucket credentials
    #[allow(dead_code)]
    Private,
}

/// An object that was written to the bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

/// Where public object URLs point to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEndpoint {
    /// Scheme-qualified host, e.g. `https://s3-ap-northeast-2.amazonaws.com`
    pub host: String,
    pub bucket_name: String,
}

impl BucketEndpoint {
    /// `https://<host>/<bucket>/<key>`
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.host.trim_end_matches('/'),
            self.bucket_name,
            key
        )
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to configure storage client: {0}")]
    Config(String),

    #[error("Failed to upload object '{key}': {reason}")]
    Upload { key: String, reason: String },

    #[error("Failed to delete {failed} of {total} objects: {reason}")]
    Delete {
        failed: usize,
        total: usize,
        reason: String,
    },
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write `body` under `key` and report where it can be read from
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        visibility: Visibility,
    ) -> Result<StoredObject, StorageError>;

    /// Best-effort removal of `keys`. Every key is attempted; partial
    /// deletion is reported as an error but not retried.
    async fn delete_many(&self, keys: &[String]) -> Result<(), StorageError>;

    fn bucket_endpoint(&self) -> BucketEndpoint;
}
