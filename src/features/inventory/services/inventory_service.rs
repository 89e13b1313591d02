use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::inventory::dtos::{CreateInventoryItemDto, UpdateInventoryItemDto};
use crate::features::inventory::models::{InventoryItem, InventoryPatch, NewInventoryItem};
use crate::features::inventory::repositories::InventoryRepository;

/// Trimmed text, or `None` when blank
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn item_name(value: &str) -> Result<String> {
    let name = value.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "Item name must not be blank".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn quantity(value: i32) -> Result<i32> {
    if value < 0 {
        return Err(AppError::Validation(
            "Quantity cannot be negative".to_string(),
        ));
    }
    Ok(value)
}

pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn add_item(&self, dto: CreateInventoryItemDto) -> Result<InventoryItem> {
        let item = self
            .repository
            .insert(NewInventoryItem {
                item_name: item_name(&dto.item_name)?,
                quantity: quantity(dto.quantity)?,
                location: optional_text(dto.location),
                category: optional_text(dto.category),
                notes: optional_text(dto.notes),
            })
            .await?;

        info!(
            "Inventory item added: {} x{} (id={})",
            item.item_name, item.quantity, item.id
        );
        Ok(item)
    }

    /// Blank search lists everything
    pub async fn search(&self, search: Option<String>) -> Result<Vec<InventoryItem>> {
        let search = optional_text(search);
        self.repository.search(search.as_deref()).await
    }

    pub async fn update_item(&self, id: Uuid, dto: UpdateInventoryItemDto) -> Result<InventoryItem> {
        let patch = InventoryPatch {
            item_name: dto.item_name.as_deref().map(item_name).transpose()?,
            quantity: dto.quantity.map(quantity).transpose()?,
            location: dto.location.map(optional_text),
            category: dto.category.map(optional_text),
            notes: dto.notes.map(optional_text),
        };

        let item = self
            .repository
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", id)))?;

        info!("Inventory item updated: id={}, quantity={}", item.id, item.quantity);
        Ok(item)
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Inventory item {} not found",
                id
            )));
        }
        info!("Inventory item {} deleted", id);
        Ok(())
    }
}
