use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{RequireAdmin, RequireInventory};
use crate::features::inventory::dtos::{
    CreateInventoryItemDto, InventorySearchQuery, UpdateInventoryItemDto,
};
use crate::features::inventory::models::InventoryItem;
use crate::features::inventory::services::InventoryService;
use crate::shared::csv_export::{sheet_date, CsvSheet};
use crate::shared::types::{ApiResponse, Meta};

/// Record a stock line
#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = CreateInventoryItemDto,
    responses(
        (status = 201, description = "Item recorded", body = ApiResponse<InventoryItem>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Inventory access required")
    ),
    tag = "inventory",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_item(
    RequireInventory(_user): RequireInventory,
    State(service): State<Arc<InventoryService>>,
    AppJson(dto): AppJson<CreateInventoryItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<InventoryItem>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.add_item(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some("Item added".to_string()),
            None,
        )),
    ))
}

/// Search the inventory
#[utoipa::path(
    get,
    path = "/api/admin/inventory",
    params(InventorySearchQuery),
    responses(
        (status = 200, description = "Matching items sorted by name", body = ApiResponse<Vec<InventoryItem>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "inventory",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_items(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<InventoryService>>,
    AppQuery(query): AppQuery<InventorySearchQuery>,
) -> Result<Json<ApiResponse<Vec<InventoryItem>>>> {
    let items = service.search(query.search).await?;
    let total = items.len();
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::total(total)),
    )))
}

/// Update a stock line
#[utoipa::path(
    patch,
    path = "/api/admin/inventory/{id}",
    params(
        ("id" = Uuid, Path, description = "Inventory item id")
    ),
    request_body = UpdateInventoryItemDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<InventoryItem>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Item not found")
    ),
    tag = "inventory",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_item(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateInventoryItemDto>,
) -> Result<Json<ApiResponse<InventoryItem>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.update_item(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Item updated".to_string()),
        None,
    )))
}

/// Delete a stock line
#[utoipa::path(
    delete,
    path = "/api/admin/inventory/{id}",
    params(
        ("id" = Uuid, Path, description = "Inventory item id")
    ),
    responses(
        (status = 200, description = "Item deleted", body = ApiResponse<()>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Item not found")
    ),
    tag = "inventory",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_item(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_item(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Item deleted".to_string()),
        None,
    )))
}

/// Download the inventory as a CSV sheet
///
/// Same filter and order as the inventory list. Columns are separated by `;`.
#[utoipa::path(
    get,
    path = "/api/admin/inventory/export",
    params(InventorySearchQuery),
    responses(
        (status = 200, description = "Inventory sheet", body = String, content_type = "text/csv"),
        (status = 403, description = "Admin access required")
    ),
    tag = "inventory",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_items(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<InventoryService>>,
    AppQuery(query): AppQuery<InventorySearchQuery>,
) -> Result<CsvSheet> {
    let items = service.search(query.search).await?;
    CsvSheet::build(
        format!("inventaire_{}.csv", Local::now().date_naive()),
        b';',
        &[
            "Article",
            "Quantité",
            "Emplacement",
            "Catégorie",
            "Dernière mise à jour",
            "Notes",
        ],
        items.into_iter().map(|item| {
            [
                item.item_name,
                item.quantity.to_string(),
                item.location.unwrap_or_default(),
                item.category.unwrap_or_default(),
                sheet_date(item.last_updated),
                item.notes.unwrap_or_default(),
            ]
        }),
    )
}
