//! Storage module for image objects
//!
//! Provides the storage gateway contract and its S3-compatible
//! implementation.

mod object_storage;
mod s3_client;

pub use object_storage::{BucketEndpoint, ObjectStorage, StorageError, StoredObject, Visibility};
pub use s3_client::S3Storage;
