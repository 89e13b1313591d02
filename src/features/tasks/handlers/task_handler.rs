use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::CompanyAccess;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::tasks::dtos::{DayValidationSummary, RotationDto, UpdateTaskDto};
use crate::features::tasks::models::{TaskHistory, TaskInstance};
use crate::features::tasks::services::TaskService;
use crate::shared::types::{ApiResponse, DateQuery, DateRangeQuery, Meta};

/// Rotation slot of a date
#[utoipa::path(
    get,
    path = "/api/rotation",
    params(DateQuery),
    responses(
        (status = 200, description = "Rotation week and day name", body = ApiResponse<RotationDto>),
        (status = 400, description = "Invalid date"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_rotation(
    _user: AuthenticatedUser,
    State(service): State<Arc<TaskService>>,
    AppQuery(query): AppQuery<DateQuery>,
) -> Result<Json<ApiResponse<RotationDto>>> {
    let slot = service.slot_for(query.date);
    Ok(Json(ApiResponse::success(
        Some(RotationDto::new(query.date, slot)),
        None,
        None,
    )))
}

/// Tasks of a lot for a day
///
/// Instances are created from the rotation templates the first time a day is viewed.
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/tasks",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Task instances ordered by name", body = ApiResponse<Vec<TaskInstance>>),
        (status = 403, description = "No access to this lot")
    ),
    tag = "tasks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_tasks(
    access: CompanyAccess,
    State(service): State<Arc<TaskService>>,
    AppQuery(query): AppQuery<DateQuery>,
) -> Result<Json<ApiResponse<Vec<TaskInstance>>>> {
    let tasks = service.materialize_day(access.company_id, query.date).await?;
    let total = tasks.len();
    Ok(Json(ApiResponse::success(
        Some(tasks),
        None,
        Some(Meta::total(total)),
    )))
}

/// Update completion, times or remarks of a task
#[utoipa::path(
    patch,
    path = "/api/companies/{company_id}/tasks/{id}",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        ("id" = Uuid, Path, description = "Task instance id")
    ),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Task updated", body = ApiResponse<TaskInstance>),
        (status = 400, description = "Invalid time"),
        (status = 403, description = "No access to this lot"),
        (status = 404, description = "Task not found")
    ),
    tag = "tasks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_task(
    access: CompanyAccess,
    State(service): State<Arc<TaskService>>,
    Path((_company_id, id)): Path<(i64, Uuid)>,
    AppJson(dto): AppJson<UpdateTaskDto>,
) -> Result<Json<ApiResponse<TaskInstance>>> {
    let task = service.update_task(access.company_id, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(task), None, None)))
}

/// Validate a working day
///
/// Copies the day's tasks and archived damage reports into history, then resets
/// the day's tasks.
#[utoipa::path(
    post,
    path = "/api/companies/{company_id}/tasks/validate",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Day archived", body = ApiResponse<DayValidationSummary>),
        (status = 403, description = "No access to this lot")
    ),
    tag = "tasks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn validate_day(
    access: CompanyAccess,
    State(service): State<Arc<TaskService>>,
    AppQuery(query): AppQuery<DateQuery>,
) -> Result<Json<ApiResponse<DayValidationSummary>>> {
    let summary = service.validate_day(access.company_id, query.date).await?;
    Ok(Json(ApiResponse::success(
        Some(summary),
        Some("Day validated".to_string()),
        None,
    )))
}

/// Task history of a lot over a date range
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/tasks/history",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateRangeQuery
    ),
    responses(
        (status = 200, description = "Archived tasks", body = ApiResponse<Vec<TaskHistory>>),
        (status = 400, description = "Invalid date range"),
        (status = 403, description = "No access to this lot")
    ),
    tag = "tasks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_history(
    access: CompanyAccess,
    State(service): State<Arc<TaskService>>,
    AppQuery(query): AppQuery<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<TaskHistory>>>> {
    let history = service
        .list_history(Some(access.company_id), query.into_range()?)
        .await?;
    let total = history.len();
    Ok(Json(ApiResponse::success(
        Some(history),
        None,
        Some(Meta::total(total)),
    )))
}
