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
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::{
    ChangePasswordDto, ClientAccountDto, CreateClientDto, ResetPasswordDto, StaffAccount,
};
use crate::features::users::services::AccountService;
use crate::shared::types::{ApiResponse, Meta};

/// List client accounts
#[utoipa::path(
    get,
    path = "/api/admin/clients",
    responses(
        (status = 200, description = "Client accounts, newest first", body = ApiResponse<Vec<ClientAccountDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_clients(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AccountService>>,
) -> Result<Json<ApiResponse<Vec<ClientAccountDto>>>> {
    let clients = service.list_clients().await?;
    let total = clients.len();
    Ok(Json(ApiResponse::success(
        Some(clients),
        None,
        Some(Meta::total(total)),
    )))
}

/// Create a client account
#[utoipa::path(
    post,
    path = "/api/admin/clients",
    request_body = CreateClientDto,
    responses(
        (status = 201, description = "Client account created", body = ApiResponse<ClientAccountDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Username already exists")
    ),
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_client(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AccountService>>,
    AppJson(dto): AppJson<CreateClientDto>,
) -> Result<(StatusCode, Json<ApiResponse<ClientAccountDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let client = service.create_client(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(client), None, None)),
    ))
}

/// Delete a client account
#[utoipa::path(
    delete,
    path = "/api/admin/clients/{id}",
    params(
        ("id" = Uuid, Path, description = "Client account id")
    ),
    responses(
        (status = 200, description = "Client account deleted", body = ApiResponse<()>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Client account not found")
    ),
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_client(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AccountService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_client(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Client account deleted".to_string()),
        None,
    )))
}

/// Reset a client password
#[utoipa::path(
    put,
    path = "/api/admin/clients/{id}/password",
    params(
        ("id" = Uuid, Path, description = "Client account id")
    ),
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = ApiResponse<()>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Client account not found")
    ),
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reset_client_password(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AccountService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ResetPasswordDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.reset_client_password(id, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password reset".to_string()),
        None,
    )))
}

/// Change the manager or inventory account password
#[utoipa::path(
    put,
    path = "/api/admin/accounts/{account}/password",
    params(
        ("account" = StaffAccount, Path, description = "`manager` or `inventory`")
    ),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<()>),
        (status = 400, description = "Validation error or confirmation mismatch"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Account not found")
    ),
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn change_staff_password(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AccountService>>,
    Path(account): Path<StaffAccount>,
    AppJson(dto): AppJson<ChangePasswordDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.change_staff_password(account, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password changed".to_string()),
        None,
    )))
}
