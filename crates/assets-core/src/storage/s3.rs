//! Amazon S3 implementation of [`Storage`]

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectCannedAcl, ObjectIdentifier};

use super::{PutObject, Storage, StorageError, StorageResult};

/// DeleteObjects accepts at most this many keys per request.
const MAX_DELETE_BATCH: usize = 1000;

/// [`Storage`] backed by an `aws-sdk-s3` client.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the standard AWS environment (credentials chain,
    /// region, profile).
    ///
    /// With `endpoint_url`, requests go to that S3-compatible endpoint using
    /// path-style addressing.
    pub async fn from_env(endpoint_url: Option<&str>) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(url) = endpoint_url {
            tracing::debug!(endpoint_url = url, "Using custom S3 endpoint");
            builder = builder.endpoint_url(url).force_path_style(true);
        }
        Self::new(Client::from_conf(builder.build()))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_object(&self, request: PutObject) -> StorageResult<()> {
        let PutObject {
            bucket,
            key,
            body,
            acl,
            cache_control,
            content_type,
            metadata,
        } = request;

        let metadata: HashMap<String, String> = metadata.into_iter().collect();

        self.client
            .put_object()
            .bucket(&bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .acl(ObjectCannedAcl::from(acl.as_str()))
            .cache_control(cache_control)
            .content_type(content_type)
            .set_metadata(Some(metadata))
            .send()
            .await
            .map_err(|e| StorageError::new("PutObject", &bucket, DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(%bucket, %key, "Put object");
        Ok(())
    }

    async fn list_objects(&self, bucket: &str) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| {
                    StorageError::new("ListObjectsV2", bucket, DisplayErrorContext(&e).to_string())
                })?;

            keys.extend(
                output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(str::to_string),
            );

            match output.next_continuation_token() {
                Some(token) if output.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        tracing::debug!(bucket, count = keys.len(), "Listed objects");
        Ok(keys)
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        for batch in keys.chunks(MAX_DELETE_BATCH) {
            let objects = batch
                .iter()
                .map(|key| {
                    ObjectIdentifier::builder()
                        .key(key)
                        .build()
                        .map_err(|e| StorageError::new("DeleteObjects", bucket, e.to_string()))
                })
                .collect::<StorageResult<Vec<_>>>()?;

            let delete = Delete::builder()
                .set_objects(Some(objects))
                .quiet(true)
                .build()
                .map_err(|e| StorageError::new("DeleteObjects", bucket, e.to_string()))?;

            let output = self
                .client
                .delete_objects()
                .bucket(bucket)
                .delete(delete)
                .send()
                .await
                .map_err(|e| {
                    StorageError::new("DeleteObjects", bucket, DisplayErrorContext(&e).to_string())
                })?;

            if let Some(first) = output.errors().first() {
                return Err(StorageError::new(
                    "DeleteObjects",
                    bucket,
                    format!(
                        "{} of {} keys not deleted, first {}: {}",
                        output.errors().len(),
                        batch.len(),
                        first.key().unwrap_or("<unknown>"),
                        first.message().unwrap_or("no message"),
                    ),
                ));
            }

            tracing::debug!(bucket, count = batch.len(), "Deleted objects");
        }

        Ok(())
    }
}
