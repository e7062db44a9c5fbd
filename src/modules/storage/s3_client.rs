//! S3-compatible storage client
//!
//! Implements [`ObjectStorage`] for AWS S3 or any S3-compatible service
//! (MinIO, R2, ...). Uses the rust-s3 crate for lightweight S3 operations.

use async_trait::async_trait;
use futures::future::join_all;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::modules::storage::object_storage::{
    BucketEndpoint, ObjectStorage, StorageError, StoredObject, Visibility,
};
use crate::shared::constants::IMAGE_CONTENT_TYPE;

/// Canned ACL header that makes an object publicly readable
const ACL_HEADER: &str = "x-amz-acl";
const ACL_PUBLIC_READ: &str = "public-read";

/// S3-compatible storage client
pub struct S3Storage {
    /// Plain bucket handle used for private puts and deletes
    bucket: Box<Bucket>,
    /// Same bucket, but every request carries `x-amz-acl: public-read`
    public_bucket: Box<Bucket>,
    endpoint: BucketEndpoint,
}

impl S3Storage {
    /// Create a new client from configuration.
    ///
    /// The bucket must already exist; this client never creates buckets or
    /// touches bucket policies.
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(format!("Failed to load storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Config(format!("Failed to create bucket handle: {}", e)))?;

        // Path-style URLs (https://endpoint/bucket) work for AWS and MinIO alike
        bucket.set_path_style();

        let mut public_bucket = bucket.clone();
        public_bucket.add_header(ACL_HEADER, ACL_PUBLIC_READ);

        let endpoint = BucketEndpoint {
            host: config.public_endpoint,
            bucket_name: config.bucket,
        };

        info!(
            "S3 storage initialized for endpoint: {}, bucket: {}, public host: {}",
            config.endpoint, endpoint.bucket_name, endpoint.host
        );

        Ok(Self {
            bucket,
            public_bucket,
            endpoint,
        })
    }

    fn bucket_for(&self, visibility: Visibility) -> &Bucket {
        match visibility {
            Visibility::PublicRead => &self.public_bucket,
            Visibility::Private => &self.bucket,
        }
    }

    /// Delete a single object
    async fn delete_one(&self, key: &str) -> Result<(), String> {
        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(|e| format!("'{}': {}", key, e))?;

        let status = response.status_code();
        if !is_success(status) {
            return Err(format!("'{}': unexpected status {}", key, status));
        }

        debug!("Deleted object '{}' from bucket '{}'", key, self.bucket.name());
        Ok(())
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        visibility: Visibility,
    ) -> Result<StoredObject, StorageError> {
        let upload_error = |reason: String| StorageError::Upload {
            key: key.to_string(),
            reason,
        };

        let response = self
            .bucket_for(visibility)
            .put_object_with_content_type(key, &body, IMAGE_CONTENT_TYPE)
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        let status = response.status_code();
        if !is_success(status) {
            return Err(upload_error(format!("unexpected status {}", status)));
        }

        debug!(
            "Uploaded object '{}' ({} bytes) to bucket '{}'",
            key,
            body.len(),
            self.bucket.name()
        );

        Ok(StoredObject {
            key: key.to_string(),
            url: self.endpoint.object_url(key),
        })
    }

    async fn delete_many(&self, keys: &[String]) -> Result<(), StorageError> {
        let results = join_all(keys.iter().map(|key| self.delete_one(key))).await;

        let failures: Vec<String> = results.into_iter().filter_map(Result::err).collect();
        if failures.is_empty() {
            return Ok(());
        }

        for failure in &failures {
            warn!("Failed to delete object {}", failure);
        }

        Err(StorageError::Delete {
            failed: failures.len(),
            total: keys.len(),
            reason: failures.join("; "),
        })
    }

    fn bucket_endpoint(&self) -> BucketEndpoint {
        self.endpoint.clone()
    }
}
