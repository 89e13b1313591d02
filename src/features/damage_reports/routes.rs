use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::damage_reports::handlers;
use crate::features::damage_reports::services::DamageReportService;

pub fn routes(service: Arc<DamageReportService>) -> Router {
    Router::new()
        .route(
            "/api/companies/{company_id}/damage-reports/draft",
            get(handlers::get_draft).put(handlers::save_draft),
        )
        .route(
            "/api/companies/{company_id}/damage-reports/submit",
            post(handlers::submit_report),
        )
        .route(
            "/api/companies/{company_id}/damage-reports/drafts",
            get(handlers::list_drafts),
        )
        .route(
            "/api/companies/{company_id}/damage-reports/history",
            get(handlers::list_history),
        )
        .route(
            "/api/companies/{company_id}/damage-reports/{id}",
            delete(handlers::delete_report),
        )
        .route(
            "/api/companies/{company_id}/damage-reports/{id}/date",
            put(handlers::move_draft),
        )
        .with_state(service)
}
