use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::ObjectStore;
use crate::core::error::{AppError, Result};

/// Object store kept in memory. `set_failing(true)` makes every write fail.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<Vec<(String, usize)>>,
    failing: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_public(&self, path: &str, data: Vec<u8>, _content_type: &str) -> Result<String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "object store unavailable".to_string(),
            ));
        }
        let key = format!("public/{}", path);
        self.objects.lock().unwrap().push((key.clone(), data.len()));
        Ok(format!("http://storage.test/photos/{}", key))
    }
}
