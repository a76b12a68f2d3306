//! [`MemoryStorage`]: a recording object store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use assets_core::storage::StorageResult;
use assets_core::{PutObject, Storage, StorageError};
use async_trait::async_trait;

/// An in-memory [`Storage`] that records every call.
///
/// Failures are scripted per object key (puts) or per bucket (list, delete).
/// A failing put is still recorded as attempted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: Mutex<BTreeMap<String, BTreeSet<String>>>,
    puts: Mutex<Vec<PutObject>>,
    deletes: Mutex<Vec<(String, Vec<String>)>>,
    failing_puts: BTreeSet<String>,
    failing_lists: BTreeSet<String>,
    failing_deletes: BTreeSet<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `bucket` with existing keys.
    pub fn with_objects(self, bucket: &str, keys: &[&str]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default()
            .extend(keys.iter().map(|k| k.to_string()));
        self
    }

    /// Reject puts of `key`, in any bucket.
    pub fn fail_put(mut self, key: &str) -> Self {
        self.failing_puts.insert(key.to_string());
        self
    }

    /// Reject listing `bucket`.
    pub fn fail_list(mut self, bucket: &str) -> Self {
        self.failing_lists.insert(bucket.to_string());
        self
    }

    /// Reject deletes in `bucket`.
    pub fn fail_delete(mut self, bucket: &str) -> Self {
        self.failing_deletes.insert(bucket.to_string());
        self
    }

    /// Every put attempted, in completion order.
    pub fn puts(&self) -> Vec<PutObject> {
        self.puts.lock().unwrap().clone()
    }

    /// Every delete attempted as `(bucket, keys)`.
    pub fn deletes(&self) -> Vec<(String, Vec<String>)> {
        self.deletes.lock().unwrap().clone()
    }

    /// Keys currently stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .get(bucket)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put_object(&self, request: PutObject) -> StorageResult<()> {
        let bucket = request.bucket.clone();
        let key = request.key.clone();
        self.puts.lock().unwrap().push(request);

        if self.failing_puts.contains(&key) {
            return Err(StorageError::new("PutObject", bucket, format!("rejected {}", key)));
        }
        self.objects
            .lock()
            .unwrap()
            .entry(bucket)
            .or_default()
            .insert(key);
        Ok(())
    }

    async fn list_objects(&self, bucket: &str) -> StorageResult<Vec<String>> {
        if self.failing_lists.contains(bucket) {
            return Err(StorageError::new("ListObjectsV2", bucket, "failure to list"));
        }
        Ok(self.keys(bucket))
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        self.deletes
            .lock()
            .unwrap()
            .push((bucket.to_string(), keys.to_vec()));

        if self.failing_deletes.contains(bucket) {
            return Err(StorageError::new("DeleteObjects", bucket, "failure to delete"));
        }
        if let Some(stored) = self.objects.lock().unwrap().get_mut(bucket) {
            for key in keys {
                stored.remove(key);
            }
        }
        Ok(())
    }
}
