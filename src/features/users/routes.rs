use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::AccountService;

/// Account administration, nested under `/api/admin`
pub fn admin_routes(service: Arc<AccountService>) -> Router {
    Router::new()
        .route(
            "/clients",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route("/clients/{id}", delete(handlers::delete_client))
        .route("/clients/{id}/password", put(handlers::reset_client_password))
        .route(
            "/accounts/{account}/password",
            put(handlers::change_staff_password),
        )
        .with_state(service)
}
