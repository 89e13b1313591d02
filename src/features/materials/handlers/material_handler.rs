use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireManager};
use crate::features::materials::dtos::{CreateMaterialRequestDto, SetFulfilledDto};
use crate::features::materials::models::MaterialRequest;
use crate::features::materials::services::MaterialService;
use crate::shared::types::{ApiResponse, Meta};

/// Request material for the site
#[utoipa::path(
    post,
    path = "/api/manager/materials",
    request_body = CreateMaterialRequestDto,
    responses(
        (status = 201, description = "Request recorded", body = ApiResponse<MaterialRequest>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Manager access required")
    ),
    tag = "materials",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_request(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<MaterialService>>,
    AppJson(dto): AppJson<CreateMaterialRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<MaterialRequest>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let request = service.request(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(request),
            Some("Material requested".to_string()),
            None,
        )),
    ))
}

/// Most recent material requests
#[utoipa::path(
    get,
    path = "/api/manager/materials",
    responses(
        (status = 200, description = "The 10 most recent requests", body = ApiResponse<Vec<MaterialRequest>>),
        (status = 403, description = "Manager access required")
    ),
    tag = "materials",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recent(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<MaterialService>>,
) -> Result<Json<ApiResponse<Vec<MaterialRequest>>>> {
    let requests = service.list_recent().await?;
    let total = requests.len();
    Ok(Json(ApiResponse::success(
        Some(requests),
        None,
        Some(Meta::total(total)),
    )))
}

/// Every material request
#[utoipa::path(
    get,
    path = "/api/admin/materials",
    responses(
        (status = 200, description = "All requests, newest first", body = ApiResponse<Vec<MaterialRequest>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "materials",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_all(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<MaterialService>>,
) -> Result<Json<ApiResponse<Vec<MaterialRequest>>>> {
    let requests = service.list_all().await?;
    let total = requests.len();
    Ok(Json(ApiResponse::success(
        Some(requests),
        None,
        Some(Meta::total(total)),
    )))
}

/// Mark a request fulfilled or not
#[utoipa::path(
    put,
    path = "/api/admin/materials/{id}/fulfilled",
    params(
        ("id" = Uuid, Path, description = "Material request id")
    ),
    request_body = SetFulfilledDto,
    responses(
        (status = 200, description = "Request updated", body = ApiResponse<MaterialRequest>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Request not found")
    ),
    tag = "materials",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_fulfilled(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<MaterialService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SetFulfilledDto>,
) -> Result<Json<ApiResponse<MaterialRequest>>> {
    let request = service.set_fulfilled(id, dto.fulfilled).await?;
    Ok(Json(ApiResponse::success(Some(request), None, None)))
}

/// Delete a material request
#[utoipa::path(
    delete,
    path = "/api/admin/materials/{id}",
    params(
        ("id" = Uuid, Path, description = "Material request id")
    ),
    responses(
        (status = 200, description = "Request deleted", body = ApiResponse<()>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Request not found")
    ),
    tag = "materials",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_request(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<MaterialService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Material request deleted".to_string()),
        None,
    )))
}
