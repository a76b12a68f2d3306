//! SyncEngine implementation
//!
//! The SyncEngine pushes the leaf files of settings trees to object storage,
//! or empties the buckets they target. Every operation of a batch is started
//! without ordering constraints and the batch succeeds only if all of them do.

use std::sync::Arc;

use assets_fs::FileSystem;
use futures::future::join_all;

use crate::error::{Error, Result, UploadFailure};
use crate::logger::Logger;
use crate::storage::{PutObject, Storage, StorageError};
use crate::tree::{Node, SettingsTree};

use super::plan::PlannedUpload;

/// Report from a completed upload or removal batch
///
/// A batch with any failure returns an error instead, so a report always
/// describes a fully successful run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Actions taken during the operation
    pub actions: Vec<String>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }
}

/// Engine for mirroring settings trees into object storage
///
/// The SyncEngine provides two operations:
/// - **upload_all**: put every leaf file of every tree
/// - **remove_all**: delete every object of every given bucket
pub struct SyncEngine {
    storage: Arc<dyn Storage>,
    fs: Arc<dyn FileSystem>,
    logger: Arc<dyn Logger>,
}

impl SyncEngine {
    /// Create a new SyncEngine
    ///
    /// # Arguments
    ///
    /// * `storage` - Object storage receiving uploads and deletes
    /// * `fs` - Filesystem the leaf contents are read from
    /// * `logger` - Sink for batch start/completion messages
    pub fn new(
        storage: Arc<dyn Storage>,
        fs: Arc<dyn FileSystem>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self { storage, fs, logger }
    }

    /// Upload every leaf file of every tree.
    ///
    /// All uploads run to completion even when some fail; writes are not
    /// rolled back. Any failure turns the whole batch into
    /// [`Error::UploadFailed`], which lists each failed file.
    pub async fn upload_all(&self, trees: &[SettingsTree]) -> Result<SyncReport> {
        self.logger.log("Start uploading S3 assets");

        let leaves: Vec<&Node> = trees.iter().flat_map(SettingsTree::flatten).collect();
        let attempted = leaves.len();
        tracing::debug!(files = attempted, trees = trees.len(), "Uploading leaf files");

        let outcomes = join_all(leaves.into_iter().map(|leaf| self.upload(leaf))).await;

        let mut report = SyncReport::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(action) => report = report.with_action(action),
                Err(failure) => {
                    tracing::warn!(%failure, "Upload failed");
                    failures.push(failure);
                }
            }
        }

        if !failures.is_empty() {
            return Err(Error::UploadFailed {
                failures,
                attempted,
            });
        }

        self.logger.log("Completed uploading S3 assets");
        Ok(report)
    }

    async fn upload(&self, leaf: &Node) -> std::result::Result<String, UploadFailure> {
        let planned = PlannedUpload::from_leaf(leaf);
        let fail = |error: Error| UploadFailure {
            path: leaf.path().clone(),
            key: planned.key.clone(),
            error,
        };

        let bucket = planned.bucket.clone().ok_or_else(|| {
            fail(Error::MissingBucket {
                path: leaf.path().clone(),
            })
        })?;
        let body = self
            .fs
            .read_file(leaf.path())
            .await
            .map_err(|e| fail(e.into()))?;

        let action = format!("Uploaded {} to {}/{}", leaf.path(), bucket, planned.key);
        let request = PutObject {
            bucket,
            key: planned.key.clone(),
            body,
            acl: planned.acl.clone(),
            cache_control: planned.cache_control.clone(),
            content_type: planned.content_type.clone(),
            metadata: planned.metadata.clone(),
        };

        self.storage
            .put_object(request)
            .await
            .map_err(|e| fail(e.into()))?;

        Ok(action)
    }

    /// Delete every object in each bucket.
    ///
    /// This empties the buckets entirely, including objects that no
    /// configured file corresponds to. Buckets are processed concurrently;
    /// within one bucket the listing completes before the delete is issued.
    /// The first failing bucket, in input order, is reported as
    /// [`Error::RemovalFailed`]; the other buckets still run to completion.
    pub async fn remove_all(&self, buckets: &[String]) -> Result<SyncReport> {
        self.logger.log("Start removing S3 assets");

        let outcomes = join_all(buckets.iter().map(|bucket| self.empty_bucket(bucket))).await;

        let mut report = SyncReport::new();
        let mut first_failure = None;
        for (bucket, outcome) in buckets.iter().zip(outcomes) {
            match outcome {
                Ok(count) => {
                    report = report.with_action(format!("Removed {} objects from {}", count, bucket));
                }
                Err(source) => {
                    tracing::warn!(%bucket, error = %source, "Bucket removal failed");
                    if first_failure.is_none() {
                        first_failure = Some(Error::RemovalFailed {
                            bucket: bucket.clone(),
                            source,
                        });
                    }
                }
            }
        }

        if let Some(error) = first_failure {
            return Err(error);
        }

        self.logger.log("Completed removing S3 assets");
        Ok(report)
    }

    async fn empty_bucket(&self, bucket: &str) -> std::result::Result<usize, StorageError> {
        let keys = self.storage.list_objects(bucket).await?;
        if keys.is_empty() {
            tracing::debug!(bucket, "Bucket already empty");
            return Ok(0);
        }

        self.storage.delete_objects(bucket, &keys).await?;
        Ok(keys.len())
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine").finish_non_exhaustive()
    }
}
