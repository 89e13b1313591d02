use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::tickets::handlers;
use crate::features::tickets::services::TicketService;

/// Client and manager ticket endpoints
pub fn routes(service: Arc<TicketService>) -> Router {
    Router::new()
        .route(
            "/api/tickets",
            get(handlers::list_my_tickets).post(handlers::create_ticket),
        )
        .route("/api/tickets/stream", get(handlers::client_ticket_stream))
        .route("/api/tickets/{id}/archive", put(handlers::archive_ticket))
        .route("/api/tickets/{id}/messages", get(handlers::list_messages))
        .route("/api/manager/tickets", get(handlers::list_active_tickets))
        .route(
            "/api/manager/tickets/stream",
            get(handlers::manager_ticket_stream),
        )
        .route(
            "/api/manager/tickets/{id}/comments",
            post(handlers::comment_ticket),
        )
        .route(
            "/api/manager/tickets/{id}/complete",
            put(handlers::complete_ticket),
        )
        .with_state(service)
}

/// Ticket administration, nested under `/api/admin`
pub fn admin_routes(service: Arc<TicketService>) -> Router {
    Router::new()
        .route("/tickets", get(handlers::list_all_tickets))
        .route("/tickets/export", get(handlers::export_tickets))
        .route("/tickets/{id}", delete(handlers::delete_ticket))
        .route("/tickets/{id}/status", put(handlers::set_ticket_status))
        .route("/tickets/{id}/reason", put(handlers::update_ticket_reason))
        .with_state(service)
}
