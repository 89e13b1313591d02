use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::attendance::handlers;
use crate::features::attendance::services::AttendanceService;

/// Check-in and check-out for lot employees
pub fn routes(service: Arc<AttendanceService>) -> Router {
    Router::new()
        .route(
            "/api/companies/{company_id}/attendance/check-in",
            post(handlers::check_in),
        )
        .route(
            "/api/companies/{company_id}/attendance/check-out",
            post(handlers::check_out),
        )
        .with_state(service)
}

/// Daily attendance sheet, nested under `/api/admin`
pub fn admin_routes(service: Arc<AttendanceService>) -> Router {
    Router::new()
        .route("/attendance", get(handlers::list_attendance))
        .route("/attendance/export", get(handlers::export_attendance))
        .with_state(service)
}
