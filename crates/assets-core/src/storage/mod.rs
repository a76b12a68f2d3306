//! Object-storage capability
//!
//! The sync engine only needs three operations: write one object, list every
//! key of a bucket, and delete a set of keys. [`S3Storage`] implements them
//! against Amazon S3 (or any S3-compatible endpoint).

mod s3;

use std::collections::BTreeMap;

use async_trait::async_trait;

pub use s3::S3Storage;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// A storage operation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} on bucket {bucket} failed: {message}")]
pub struct StorageError {
    /// Operation name, e.g. `PutObject`
    pub operation: String,
    pub bucket: String,
    pub message: String,
}

impl StorageError {
    pub fn new(
        operation: impl Into<String>,
        bucket: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            bucket: bucket.into(),
            message: message.into(),
        }
    }
}

/// Everything needed to write one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub acl: String,
    pub cache_control: String,
    pub content_type: String,
    pub metadata: BTreeMap<String, String>,
}

/// Object-storage operations used by the sync engine.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn put_object(&self, request: PutObject) -> StorageResult<()>;

    /// List every key in `bucket`, across all result pages.
    async fn list_objects(&self, bucket: &str) -> StorageResult<Vec<String>>;

    /// Delete `keys` from `bucket`.
    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> StorageResult<()>;
}
