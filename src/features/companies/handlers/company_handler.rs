use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::companies::dtos::{CompanyDto, CreateCompanyDto, SetCompanyPasswordDto};
use crate::features::companies::services::CompanyService;
use crate::shared::types::{ApiResponse, Meta};

/// List all lots
#[utoipa::path(
    get,
    path = "/api/companies",
    responses(
        (status = 200, description = "Lots ordered by id", body = ApiResponse<Vec<CompanyDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "companies",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_companies(
    _user: AuthenticatedUser,
    State(service): State<Arc<CompanyService>>,
) -> Result<Json<ApiResponse<Vec<CompanyDto>>>> {
    let companies = service.list().await?;
    let total = companies.len();
    Ok(Json(ApiResponse::success(
        Some(companies),
        None,
        Some(Meta::total(total)),
    )))
}

/// Create a lot
#[utoipa::path(
    post,
    path = "/api/admin/companies",
    request_body = CreateCompanyDto,
    responses(
        (status = 201, description = "Lot created", body = ApiResponse<CompanyDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Lot already exists")
    ),
    tag = "companies",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_company(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CompanyService>>,
    AppJson(dto): AppJson<CreateCompanyDto>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let company = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(company), None, None)),
    ))
}

/// Set the shared employee password of a lot
#[utoipa::path(
    put,
    path = "/api/admin/companies/{id}/password",
    params(
        ("id" = i64, Path, description = "Lot id")
    ),
    request_body = SetCompanyPasswordDto,
    responses(
        (status = 200, description = "Password updated", body = ApiResponse<()>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Lot not found")
    ),
    tag = "companies",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_company_password(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CompanyService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SetCompanyPasswordDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.set_password(id, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password updated".to_string()),
        None,
    )))
}
