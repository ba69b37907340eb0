//! In-memory storage double that records every call

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::ObjectStorage;
use crate::core::error::AppError;

pub const MEMORY_BASE_URL: &str = "memory://bucket";

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    puts: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    failing_keys: Mutex<HashSet<String>>,
    failing_deletes: Mutex<HashSet<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `put` fail for any key containing `fragment`
    pub fn fail_puts_matching(&self, fragment: &str) {
        self.failing_keys.lock().unwrap().insert(fragment.to_string());
    }

    pub fn fail_delete_of(&self, url: &str) {
        self.failing_deletes.lock().unwrap().insert(url.to_string());
    }

    pub fn put_keys(&self) -> Vec<String> {
        self.puts.lock().unwrap().clone()
    }

    pub fn deleted_urls(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String, AppError> {
        self.puts.lock().unwrap().push(key.to_string());

        let fails = self
            .failing_keys
            .lock()
            .unwrap()
            .iter()
            .any(|fragment| key.contains(fragment.as_str()));
        if fails {
            return Err(AppError::ExternalServiceError(format!(
                "Failed to upload file '{}'",
                key
            )));
        }

        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(format!("{}/{}", MEMORY_BASE_URL, key))
    }

    async fn delete_url(&self, url: &str) -> Result<(), AppError> {
        self.deletes.lock().unwrap().push(url.to_string());

        if self.failing_deletes.lock().unwrap().contains(url) {
            return Err(AppError::ExternalServiceError(format!(
                "Failed to delete '{}'",
                url
            )));
        }

        if let Some(key) = url.strip_prefix(&format!("{}/", MEMORY_BASE_URL)) {
            self.objects.lock().unwrap().remove(key);
        }
        Ok(())
    }
}
