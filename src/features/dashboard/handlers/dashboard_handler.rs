use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::auth::guards::RequireAdmin;
use crate::features::dashboard::dtos::{CompanyDetailDto, OverviewDto, OverviewQuery};
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Task completion and damage counts for every lot
#[utoipa::path(
    get,
    path = "/api/admin/overview",
    params(OverviewQuery),
    responses(
        (status = 200, description = "One entry per lot", body = ApiResponse<OverviewDto>),
        (status = 400, description = "Invalid date range"),
        (status = 403, description = "Admin access required")
    ),
    tag = "dashboard",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_overview(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<OverviewQuery>,
) -> Result<Json<ApiResponse<OverviewDto>>> {
    let (mode, range) = query.into_parts()?;
    let overview = service.overview(mode, range).await?;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}

/// Rows behind one lot's overview numbers
#[utoipa::path(
    get,
    path = "/api/admin/overview/{company_id}",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        OverviewQuery
    ),
    responses(
        (status = 200, description = "Summary plus task and damage rows", body = ApiResponse<CompanyDetailDto>),
        (status = 400, description = "Invalid date range"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Lot not found")
    ),
    tag = "dashboard",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_company_detail(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DashboardService>>,
    Path(company_id): Path<i64>,
    AppQuery(query): AppQuery<OverviewQuery>,
) -> Result<Json<ApiResponse<CompanyDetailDto>>> {
    let (mode, range) = query.into_parts()?;
    let detail = service.company_detail(company_id, mode, range).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}
