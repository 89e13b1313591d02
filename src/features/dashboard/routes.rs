use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Admin overview, nested under `/api/admin`
pub fn admin_routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/overview", get(handlers::get_overview))
        .route("/overview/{company_id}", get(handlers::get_company_detail))
        .with_state(service)
}
