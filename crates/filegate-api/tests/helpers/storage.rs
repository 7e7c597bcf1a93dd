//! In-memory `ObjectStore` double for integration tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use filegate_storage::{ObjectBody, ObjectStore, StorageError, StorageResult};

/// Failure toggles for exercising the gateway's error branches.
#[derive(Debug, Default)]
pub struct StoreBehavior {
    /// Every write fails the way the service rejects policy violations.
    pub deny_writes: bool,
    /// Every signing call fails.
    pub fail_signing: bool,
}

/// In-memory store keyed exactly like the real service: verbatim object keys
/// mapped to (content_type, bytes).
pub struct MemoryStore {
    objects: Mutex<HashMap<String, (String, Bytes)>>,
    behavior: StoreBehavior,
}

impl MemoryStore {
    pub fn with_behavior(behavior: StoreBehavior) -> Self {
        MemoryStore {
            objects: Mutex::new(HashMap::new()),
            behavior,
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(&self, key: &str, content_type: &str, data: Vec<u8>) -> StorageResult<()> {
        if self.behavior.deny_writes {
            return Err(StorageError::PermissionDenied(
                "new row violates row-level security policy".to_string(),
            ));
        }

        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(key) {
            return Err(StorageError::AlreadyExists(
                "The resource already exists".to_string(),
            ));
        }
        objects.insert(
            key.to_string(),
            (content_type.to_string(), Bytes::from(data)),
        );
        Ok(())
    }

    async fn download(&self, key: &str) -> StorageResult<ObjectBody> {
        let objects = self.objects.lock().unwrap();
        match objects.get(key) {
            Some((_, bytes)) => Ok(ObjectBody::Buffered(bytes.clone())),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }

    async fn create_signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        if self.behavior.fail_signing {
            return Err(StorageError::SignFailed("signing backend offline".to_string()));
        }
        Ok(format!(
            "https://signed.example/files/{}?expires={}",
            key,
            expires_in.as_secs()
        ))
    }

    async fn remove(&self, key: &str) -> StorageResult<serde_json::Value> {
        let mut objects = self.objects.lock().unwrap();
        match objects.remove(key) {
            Some(_) => Ok(serde_json::json!([{ "name": key }])),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }
}
