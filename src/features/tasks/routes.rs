use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::tasks::handlers;
use crate::features::tasks::services::TaskService;

pub fn routes(service: Arc<TaskService>) -> Router {
    Router::new()
        .route("/api/rotation", get(handlers::get_rotation))
        .route("/api/companies/{company_id}/tasks", get(handlers::list_tasks))
        .route(
            "/api/companies/{company_id}/tasks/validate",
            post(handlers::validate_day),
        )
        .route(
            "/api/companies/{company_id}/tasks/history",
            get(handlers::list_history),
        )
        .route(
            "/api/companies/{company_id}/tasks/{id}",
            patch(handlers::update_task),
        )
        .with_state(service)
}
