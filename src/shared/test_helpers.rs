use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::modules::storage::{
    BucketEndpoint, ObjectStorage, StorageError, StoredObject, Visibility,
};

pub const TEST_HOST: &str = "https://s3-ap-northeast-2.amazonaws.com";
pub const TEST_BUCKET: &str = "test-bucket";

/// In-memory storage that records every call.
/// Builder pattern: `.fail_on_body()`, `.fail_deletes()`, `.with_put_delay()`.
#[derive(Default)]
pub struct InMemoryStorage {
    objects: Mutex<HashMap<String, (Vec<u8>, Visibility)>>,
    failing_bodies: HashSet<Vec<u8>>,
    fail_deletes: bool,
    put_delay: Option<Duration>,
    put_calls: AtomicUsize,
    delete_calls: Mutex<Vec<Vec<String>>>,
    /// (body, key) of every put that succeeded, never cleared by deletes
    uploaded: Mutex<Vec<(Vec<u8>, String)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every put whose body equals `body`
    pub fn fail_on_body(mut self, body: &[u8]) -> Self {
        self.failing_bodies.insert(body.to_vec());
        self
    }

    pub fn fail_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn with_put_delay(mut self, delay: Duration) -> Self {
        self.put_delay = Some(delay);
        self
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// Key lists of every `delete_many` call, in call order
    pub fn delete_calls(&self) -> Vec<Vec<String>> {
        self.delete_calls.lock().unwrap().clone()
    }

    /// Key a successful put stored `body` under
    pub fn key_for_body(&self, body: &[u8]) -> Option<String> {
        self.uploaded
            .lock()
            .unwrap()
            .iter()
            .find(|(b, _)| b == body)
            .map(|(_, key)| key.clone())
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn stored_keys(&self) -> HashSet<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn visibility_of(&self, key: &str) -> Option<Visibility> {
        self.objects.lock().unwrap().get(key).map(|(_, v)| *v)
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        visibility: Visibility,
    ) -> Result<StoredObject, StorageError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.put_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_bodies.contains(&body) {
            return Err(StorageError::Upload {
                key: key.to_string(),
                reason: "AccessDenied".to_string(),
            });
        }

        self.uploaded
            .lock()
            .unwrap()
            .push((body.clone(), key.to_string()));
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (body, visibility));

        Ok(StoredObject {
            key: key.to_string(),
            url: self.bucket_endpoint().object_url(key),
        })
    }

    async fn delete_many(&self, keys: &[String]) -> Result<(), StorageError> {
        self.delete_calls.lock().unwrap().push(keys.to_vec());

        if self.fail_deletes {
            return Err(StorageError::Delete {
                failed: keys.len(),
                total: keys.len(),
                reason: "InternalError".to_string(),
            });
        }

        let mut objects = self.objects.lock().unwrap();
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    fn bucket_endpoint(&self) -> BucketEndpoint {
        BucketEndpoint {
            host: TEST_HOST.to_string(),
            bucket_name: TEST_BUCKET.to_string(),
        }
    }
}
