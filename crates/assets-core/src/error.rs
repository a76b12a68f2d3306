//! Error types for assets-core

use std::fmt;

use assets_fs::NormalizedPath;

use crate::storage::StorageError;

/// Result type for assets-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in assets-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested asset group is not a top-level key of the configuration
    #[error("Unknown asset group: {name}")]
    UnknownGroup { name: String },

    /// A leaf file resolved without a destination bucket
    #[error("No bucket configured for {path}")]
    MissingBucket { path: NormalizedPath },

    /// Storage backend rejected an operation
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// One or more uploads of a batch failed
    ///
    /// Uploads are not transactional: the successful members of the batch
    /// remain in their buckets.
    #[error("{} of {} uploads failed", .failures.len(), .attempted)]
    UploadFailed {
        failures: Vec<UploadFailure>,
        attempted: usize,
    },

    /// Listing or emptying a bucket failed
    #[error("Failed to remove objects from bucket {bucket}: {source}")]
    RemovalFailed {
        bucket: String,
        #[source]
        source: StorageError,
    },

    /// Filesystem error from assets-fs
    #[error(transparent)]
    Fs(#[from] assets_fs::Error),
}

/// A single file that could not be uploaded.
#[derive(Debug)]
pub struct UploadFailure {
    /// Filesystem path of the leaf
    pub path: NormalizedPath,
    /// Object key the leaf would have been stored under
    pub key: String,
    pub error: Error,
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.path, self.key, self.error)
    }
}
