use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::companies::handlers;
use crate::features::companies::services::CompanyService;

/// Lot listing for any authenticated user
pub fn routes(service: Arc<CompanyService>) -> Router {
    Router::new()
        .route("/api/companies", get(handlers::list_companies))
        .with_state(service)
}

/// Lot administration, nested under `/api/admin`
pub fn admin_routes(service: Arc<CompanyService>) -> Router {
    Router::new()
        .route("/companies", post(handlers::create_company))
        .route("/companies/{id}/password", put(handlers::set_company_password))
        .with_state(service)
}
