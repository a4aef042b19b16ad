//! In-memory `Storage` double that records how often it was contacted.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use clouddrive_storage::{BucketLocation, ObjectInfo, Storage, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct MemoryStorage {
    location: BucketLocation,
    objects: Mutex<BTreeMap<String, ObjectInfo>>,
    calls: AtomicUsize,
    presigns: AtomicUsize,
    fail_presign_at: Option<usize>,
    fail_list: Option<String>,
}

impl MemoryStorage {
    pub fn new(bucket: &str, region: &str) -> Self {
        Self {
            location: BucketLocation::new(bucket, region),
            objects: Mutex::new(BTreeMap::new()),
            calls: AtomicUsize::new(0),
            presigns: AtomicUsize::new(0),
            fail_presign_at: None,
            fail_list: None,
        }
    }

    /// The `index`-th presign call (0-based) and every later one fail.
    pub fn failing_presign_at(mut self, index: usize) -> Self {
        self.fail_presign_at = Some(index);
        self
    }

    pub fn failing_list(mut self, message: &str) -> Self {
        self.fail_list = Some(message.to_string());
        self
    }

    pub fn with_objects(self, count: usize) -> Self {
        {
            let mut objects = self.objects.lock().unwrap();
            for i in 0..count {
                let key = format!("uploads/file-{:04}.txt", i);
                objects.insert(
                    key.clone(),
                    ObjectInfo {
                        key,
                        size: 100 + i as u64,
                        last_modified: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                        etag: Some(format!("\"etag-{}\"", i)),
                    },
                );
            }
        }
        self
    }

    pub fn insert(&self, key: &str, size: u64) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            ObjectInfo {
                key: key.to_string(),
                size,
                last_modified: Utc::now(),
                etag: None,
            },
        );
    }

    /// Total number of store operations performed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    fn signed(&self, method: &str, key: &str, expires_in: Duration) -> String {
        format!(
            "{}?X-Amz-Method={}&X-Amz-Expires={}&X-Amz-Signature=test",
            self.location.object_url(key),
            method,
            expires_in.as_secs()
        )
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn location(&self) -> &BucketLocation {
        &self.location
    }

    async fn presigned_put_url(
        &self,
        storage_key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let index = self.presigns.fetch_add(1, Ordering::SeqCst);
        if self.fail_presign_at.is_some_and(|at| index >= at) {
            return Err(StorageError::PresignFailed(
                "signing service unavailable".to_string(),
            ));
        }
        Ok(self.signed("PUT", storage_key, expires_in))
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.signed("GET", storage_key, expires_in))
    }

    async fn list(&self, prefix: &str, max_keys: usize) -> StorageResult<Vec<ObjectInfo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref message) = self.fail_list {
            return Err(StorageError::ListFailed(message.clone()));
        }
        let objects = self.objects.lock().unwrap();
        Ok(objects
            .values()
            .filter(|o| o.key.starts_with(prefix))
            .take(max_keys)
            .cloned()
            .collect())
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().unwrap().remove(storage_key);
        Ok(())
    }
}
