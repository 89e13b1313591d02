use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::InventoryRepository;
use crate::core::error::Result;
use crate::features::inventory::models::{InventoryItem, InventoryPatch, NewInventoryItem};

pub struct MemoryInventoryRepository {
    items: Mutex<Vec<InventoryItem>>,
}

impl MemoryInventoryRepository {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InventoryRepository for MemoryInventoryRepository {
    async fn insert(&self, item: NewInventoryItem) -> Result<InventoryItem> {
        let item = InventoryItem {
            id: Uuid::now_v7(),
            item_name: item.item_name,
            quantity: item.quantity,
            location: item.location,
            category: item.category,
            notes: item.notes,
            last_updated: Utc::now(),
        };
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn search(&self, search: Option<&str>) -> Result<Vec<InventoryItem>> {
        let needle = search.map(str::to_lowercase);
        let contains = |value: &str, needle: &str| value.to_lowercase().contains(needle);

        let mut items: Vec<InventoryItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| {
                needle.as_deref().map_or(true, |n| {
                    contains(&item.item_name, n)
                        || item.location.as_deref().is_some_and(|l| contains(l, n))
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.item_name.cmp(&b.item_name));
        Ok(items)
    }

    async fn update(&self, id: Uuid, patch: InventoryPatch) -> Result<Option<InventoryItem>> {
        let mut items = self.items.lock().unwrap();
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            if let Some(name) = patch.item_name {
                item.item_name = name;
            }
            if let Some(quantity) = patch.quantity {
                item.quantity = quantity;
            }
            if let Some(location) = patch.location {
                item.location = location;
            }
            if let Some(category) = patch.category {
                item.category = category;
            }
            if let Some(notes) = patch.notes {
                item.notes = notes;
            }
            item.last_updated = Utc::now();
            item.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }
}
