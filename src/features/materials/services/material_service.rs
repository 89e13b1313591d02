use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::materials::dtos::CreateMaterialRequestDto;
use crate::features::materials::models::MaterialRequest;
use crate::features::materials::repositories::MaterialRepository;
use crate::shared::constants::MANAGER_RECENT_MATERIALS;

pub struct MaterialService {
    repository: Arc<dyn MaterialRepository>,
}

impl MaterialService {
    pub fn new(repository: Arc<dyn MaterialRepository>) -> Self {
        Self { repository }
    }

    pub async fn request(&self, dto: CreateMaterialRequestDto) -> Result<MaterialRequest> {
        let name = dto.material_name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Material name must not be blank".to_string(),
            ));
        }
        if dto.quantity < 1 {
            return Err(AppError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let request = self.repository.insert(name, dto.quantity).await?;
        info!(
            "Material requested: {} x{} (id={})",
            request.material_name, request.quantity, request.id
        );
        Ok(request)
    }

    /// What the manager dashboard shows
    pub async fn list_recent(&self) -> Result<Vec<MaterialRequest>> {
        self.repository.list(Some(MANAGER_RECENT_MATERIALS)).await
    }

    pub async fn list_all(&self) -> Result<Vec<MaterialRequest>> {
        self.repository.list(None).await
    }

    pub async fn set_fulfilled(&self, id: Uuid, fulfilled: bool) -> Result<MaterialRequest> {
        let request = self
            .repository
            .set_fulfilled(id, fulfilled)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Material request {} not found", id)))?;
        info!("Material request {} fulfilled={}", id, fulfilled);
        Ok(request)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Material request {} not found",
                id
            )));
        }
        info!("Material request {} deleted", id);
        Ok(())
    }
}
