use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::CompanyAccess;
use crate::features::damage_reports::dtos::{DamageFormDto, DraftResponseDto, MoveDraftDto};
use crate::features::damage_reports::models::{DamageHistory, DamageReport};
use crate::features::damage_reports::services::{DamageForm, DamageReportService};
use crate::modules::storage::PhotoUpload;
use crate::shared::types::{ApiResponse, DateQuery, DateRangeQuery, Meta};

/// Collect the damage form parts. Unknown parts are ignored.
async fn read_damage_form(mut multipart: Multipart) -> Result<DamageForm> {
    let mut form = DamageForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "before_photo" => form.before_photo = PhotoUpload::from_field(field).await?,
            "after_photo" => form.after_photo = PhotoUpload::from_field(field).await?,
            "description" | "start_time" | "end_time" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field '{}': {}", name, e))
                })?;
                match name.as_str() {
                    "description" => form.fields.description = text,
                    "start_time" => form.fields.start_time = Some(text),
                    _ => form.fields.end_time = Some(text),
                }
            }
            _ => debug!("Ignoring unknown field: {}", name),
        }
    }

    Ok(form)
}

/// Get the open damage draft of a day
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/damage-reports/draft",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Open draft, if any", body = ApiResponse<DraftResponseDto>),
        (status = 403, description = "No access to this lot")
    ),
    tag = "damage-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_draft(
    access: CompanyAccess,
    State(service): State<Arc<DamageReportService>>,
    AppQuery(query): AppQuery<DateQuery>,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    let draft = service.get_draft(access.company_id, query.date).await?;
    Ok(Json(ApiResponse::success(
        Some(DraftResponseDto { draft }),
        None,
        None,
    )))
}

/// Save the damage draft of a day
///
/// Creates the draft or updates the existing one. Photos that fail to upload are
/// skipped; photos not sent keep their stored URL.
#[utoipa::path(
    put,
    path = "/api/companies/{company_id}/damage-reports/draft",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateQuery
    ),
    request_body(content = DamageFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Draft saved", body = ApiResponse<DamageReport>),
        (status = 400, description = "Invalid form"),
        (status = 403, description = "No access to this lot")
    ),
    tag = "damage-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn save_draft(
    access: CompanyAccess,
    State(service): State<Arc<DamageReportService>>,
    AppQuery(query): AppQuery<DateQuery>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<DamageReport>>> {
    let form = read_damage_form(multipart).await?;
    let draft = service.save_draft(access.company_id, query.date, form).await?;
    Ok(Json(ApiResponse::success(
        Some(draft),
        Some("Draft saved".to_string()),
        None,
    )))
}

/// Submit the damage report of a day
#[utoipa::path(
    post,
    path = "/api/companies/{company_id}/damage-reports/submit",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateQuery
    ),
    request_body(content = DamageFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Report recorded in history", body = ApiResponse<DamageHistory>),
        (status = 400, description = "Invalid form"),
        (status = 403, description = "No access to this lot")
    ),
    tag = "damage-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_report(
    access: CompanyAccess,
    State(service): State<Arc<DamageReportService>>,
    AppQuery(query): AppQuery<DateQuery>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<DamageHistory>>)> {
    let form = read_damage_form(multipart).await?;
    let history = service.submit(access.company_id, query.date, form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(history),
            Some("Damage report submitted".to_string()),
            None,
        )),
    ))
}

/// List the open damage drafts of a lot
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/damage-reports/drafts",
    params(
        ("company_id" = i64, Path, description = "Lot id")
    ),
    responses(
        (status = 200, description = "Open drafts, newest first", body = ApiResponse<Vec<DamageReport>>),
        (status = 403, description = "No access to this lot")
    ),
    tag = "damage-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_drafts(
    access: CompanyAccess,
    State(service): State<Arc<DamageReportService>>,
) -> Result<Json<ApiResponse<Vec<DamageReport>>>> {
    let drafts = service.list_drafts(access.company_id).await?;
    let total = drafts.len();
    Ok(Json(ApiResponse::success(
        Some(drafts),
        None,
        Some(Meta::total(total)),
    )))
}

/// Move a damage draft to another day
#[utoipa::path(
    put,
    path = "/api/companies/{company_id}/damage-reports/{id}/date",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        ("id" = Uuid, Path, description = "Draft id")
    ),
    request_body = MoveDraftDto,
    responses(
        (status = 200, description = "Draft moved", body = ApiResponse<DamageReport>),
        (status = 403, description = "No access to this lot"),
        (status = 404, description = "Draft not found"),
        (status = 409, description = "Not a draft, or the target day already has a draft")
    ),
    tag = "damage-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn move_draft(
    access: CompanyAccess,
    State(service): State<Arc<DamageReportService>>,
    Path((_company_id, id)): Path<(i64, Uuid)>,
    AppJson(dto): AppJson<MoveDraftDto>,
) -> Result<Json<ApiResponse<DamageReport>>> {
    let draft = service
        .move_draft(access.company_id, id, dto.report_date)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(draft),
        Some("Draft moved".to_string()),
        None,
    )))
}

/// Delete a live damage report
#[utoipa::path(
    delete,
    path = "/api/companies/{company_id}/damage-reports/{id}",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        ("id" = Uuid, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Report deleted", body = ApiResponse<()>),
        (status = 403, description = "No access to this lot"),
        (status = 404, description = "Report not found")
    ),
    tag = "damage-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_report(
    access: CompanyAccess,
    State(service): State<Arc<DamageReportService>>,
    Path((_company_id, id)): Path<(i64, Uuid)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_report(access.company_id, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Damage report deleted".to_string()),
        None,
    )))
}

/// Damage history of a lot over a date range
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/damage-reports/history",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateRangeQuery
    ),
    responses(
        (status = 200, description = "Archived damage reports", body = ApiResponse<Vec<DamageHistory>>),
        (status = 400, description = "Invalid date range"),
        (status = 403, description = "No access to this lot")
    ),
    tag = "damage-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_history(
    access: CompanyAccess,
    State(service): State<Arc<DamageReportService>>,
    AppQuery(query): AppQuery<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<DamageHistory>>>> {
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
