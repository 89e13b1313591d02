use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::MaterialRepository;
use crate::core::error::Result;
use crate::features::materials::models::MaterialRequest;

pub struct MemoryMaterialRepository {
    requests: Mutex<Vec<MaterialRequest>>,
}

impl MemoryMaterialRepository {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MaterialRepository for MemoryMaterialRepository {
    async fn insert(&self, material_name: &str, quantity: i32) -> Result<MaterialRequest> {
        let mut requests = self.requests.lock().unwrap();
        // Distinct timestamps keep the newest-first order stable
        let request = MaterialRequest {
            id: Uuid::now_v7(),
            material_name: material_name.to_string(),
            quantity,
            fulfilled: false,
            requested_at: Utc::now() + Duration::milliseconds(requests.len() as i64),
        };
        requests.push(request.clone());
        Ok(request)
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<MaterialRequest>> {
        let mut requests = self.requests.lock().unwrap().clone();
        requests.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        if let Some(limit) = limit {
            requests.truncate(limit.max(0) as usize);
        }
        Ok(requests)
    }

    async fn set_fulfilled(&self, id: Uuid, fulfilled: bool) -> Result<Option<MaterialRequest>> {
        let mut requests = self.requests.lock().unwrap();
        Ok(requests.iter_mut().find(|r| r.id == id).map(|r| {
            r.fulfilled = fulfilled;
            r.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut requests = self.requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|r| r.id != id);
        Ok(requests.len() != before)
    }
}
