use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Local;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::attendance::dtos::AttendanceDto;
use crate::features::attendance::models::{CheckInOutcome, CheckOutOutcome};
use crate::features::attendance::services::{AttendanceService, DailyAttendance};
use crate::features::auth::guards::{CompanyAccess, RequireAdmin};
use crate::shared::csv_export::CsvSheet;
use crate::shared::types::{ApiResponse, DateQuery};

/// Record the arrival of an employee
///
/// The time is taken from the server clock. Checking in again the same day returns
/// the original time.
#[utoipa::path(
    post,
    path = "/api/companies/{company_id}/attendance/check-in",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateQuery
    ),
    request_body = AttendanceDto,
    responses(
        (status = 200, description = "Checked in, or already checked in", body = ApiResponse<CheckInOutcome>),
        (status = 400, description = "Invalid employee name"),
        (status = 403, description = "No access to this lot")
    ),
    tag = "attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn check_in(
    access: CompanyAccess,
    State(service): State<Arc<AttendanceService>>,
    AppQuery(query): AppQuery<DateQuery>,
    AppJson(dto): AppJson<AttendanceDto>,
) -> Result<Json<ApiResponse<CheckInOutcome>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = service
        .check_in(
            access.company_id,
            &dto.employee_name,
            query.date,
            Local::now().time(),
        )
        .await?;
    let message = match &outcome {
        CheckInOutcome::CheckedIn { checkin_time } => format!("Checked in at {}", checkin_time),
        CheckInOutcome::AlreadyCheckedIn {
            checkin_time: Some(time),
        } => format!("Already checked in at {}", time),
        CheckInOutcome::AlreadyCheckedIn { checkin_time: None } => {
            "Already checked in".to_string()
        }
    };
    Ok(Json(ApiResponse::success(Some(outcome), Some(message), None)))
}

/// Record the end of an employee's day
#[utoipa::path(
    post,
    path = "/api/companies/{company_id}/attendance/check-out",
    params(
        ("company_id" = i64, Path, description = "Lot id"),
        DateQuery
    ),
    request_body = AttendanceDto,
    responses(
        (status = 200, description = "Checked out, or nothing open to close", body = ApiResponse<CheckOutOutcome>),
        (status = 400, description = "Invalid employee name"),
        (status = 403, description = "No access to this lot")
    ),
    tag = "attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn check_out(
    access: CompanyAccess,
    State(service): State<Arc<AttendanceService>>,
    AppQuery(query): AppQuery<DateQuery>,
    AppJson(dto): AppJson<AttendanceDto>,
) -> Result<Json<ApiResponse<CheckOutOutcome>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = service
        .check_out(
            access.company_id,
            &dto.employee_name,
            query.date,
            Local::now().time(),
        )
        .await?;
    let message = match &outcome {
        CheckOutOutcome::CheckedOut { checkout_time } => {
            format!("Checked out at {}", checkout_time)
        }
        CheckOutOutcome::NothingToClose => {
            "Already checked out or never checked in".to_string()
        }
    };
    Ok(Json(ApiResponse::success(Some(outcome), Some(message), None)))
}

/// Attendance sheet of every lot for a day
#[utoipa::path(
    get,
    path = "/api/admin/attendance",
    params(DateQuery),
    responses(
        (status = 200, description = "Records, latest check-in first", body = ApiResponse<DailyAttendance>),
        (status = 403, description = "Admin access required")
    ),
    tag = "attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_attendance(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AttendanceService>>,
    AppQuery(query): AppQuery<DateQuery>,
) -> Result<Json<ApiResponse<DailyAttendance>>> {
    let day = service.list_for_date(query.date).await?;
    Ok(Json(ApiResponse::success(Some(day), None, None)))
}

/// Download the attendance sheet of a day as CSV
///
/// A missing check-out is written as `MANQUANT` and the row stays `En cours`.
#[utoipa::path(
    get,
    path = "/api/admin/attendance/export",
    params(DateQuery),
    responses(
        (status = 200, description = "Attendance sheet, latest check-in first", body = String, content_type = "text/csv"),
        (status = 403, description = "Admin access required")
    ),
    tag = "attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_attendance(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AttendanceService>>,
    AppQuery(query): AppQuery<DateQuery>,
) -> Result<CsvSheet> {
    let day = service.list_for_date(query.date).await?;
    CsvSheet::build(
        format!("pointage_{}.csv", day.date),
        b',',
        &["Entreprise", "Employé", "Arrivée", "Départ", "Statut"],
        day.records.into_iter().map(|r| {
            let status = if r.checkout_time.is_some() {
                "Complété"
            } else {
                "En cours"
            };
            [
                r.company_name,
                r.employee_name,
                r.checkin_time,
                r.checkout_time.unwrap_or_else(|| "MANQUANT".to_string()),
                status.to_string(),
            ]
        }),
    )
}
