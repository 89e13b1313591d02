use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::stream::board_sse;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireManager;
use crate::features::tickets::board::BoardAudience;
use crate::features::tickets::dtos::CommentTicketDto;
use crate::features::tickets::models::Ticket;
use crate::features::tickets::services::TicketService;
use crate::shared::types::{ApiResponse, Meta};

/// Pending and assigned tickets, newest first
#[utoipa::path(
    get,
    path = "/api/manager/tickets",
    responses(
        (status = 200, description = "Active tickets", body = ApiResponse<Vec<Ticket>>),
        (status = 403, description = "Manager access required")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_active_tickets(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<TicketService>>,
) -> Result<Json<ApiResponse<Vec<Ticket>>>> {
    let tickets = service.list_active_tickets().await?;
    let total = tickets.len();
    Ok(Json(ApiResponse::success(
        Some(tickets),
        None,
        Some(Meta::total(total)),
    )))
}

/// Comment on a ticket and mark it assigned
#[utoipa::path(
    post,
    path = "/api/manager/tickets/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Ticket id")
    ),
    request_body = CommentTicketDto,
    responses(
        (status = 200, description = "Comment recorded", body = ApiResponse<Ticket>),
        (status = 400, description = "Empty message"),
        (status = 403, description = "Manager access required"),
        (status = 404, description = "Ticket not found"),
        (status = 409, description = "Ticket is completed or archived")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn comment_ticket(
    RequireManager(user): RequireManager,
    State(service): State<Arc<TicketService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CommentTicketDto>,
) -> Result<Json<ApiResponse<Ticket>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ticket = service.comment_ticket(&user, id, &dto.message).await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        Some("Comment sent".to_string()),
        None,
    )))
}

/// Mark a ticket as done
#[utoipa::path(
    put,
    path = "/api/manager/tickets/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Ticket id")
    ),
    responses(
        (status = 200, description = "Ticket completed", body = ApiResponse<Ticket>),
        (status = 403, description = "Manager access required"),
        (status = 404, description = "Ticket not found"),
        (status = 409, description = "Ticket already completed or archived")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn complete_ticket(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<TicketService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Ticket>>> {
    let ticket = service.complete_ticket(id).await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        Some("Ticket completed".to_string()),
        None,
    )))
}

/// Live feed of the active tickets
#[utoipa::path(
    get,
    path = "/api/manager/tickets/stream",
    responses(
        (status = 200, description = "SSE stream: `snapshot`, then `prepend`, `replace` and `remove` events", content_type = "text/event-stream"),
        (status = 403, description = "Manager access required")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn manager_ticket_stream(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<TicketService>>,
) -> Result<Response> {
    let (initial, updates) = service.board_stream(BoardAudience::Manager).await?;
    Ok(board_sse(initial, updates))
}
