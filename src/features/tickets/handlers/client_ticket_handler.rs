use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use super::stream::board_sse;
use crate::core::error::{AppError, Result};
use crate::features::auth::guards::RequireClient;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::tickets::board::BoardAudience;
use crate::features::tickets::dtos::CreateTicketFormDto;
use crate::features::tickets::models::{Ticket, TicketMessage};
use crate::features::tickets::services::TicketService;
use crate::modules::storage::PhotoUpload;
use crate::shared::types::{ApiResponse, Meta};

/// File a ticket
#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body(content = CreateTicketFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Ticket created", body = ApiResponse<Ticket>),
        (status = 400, description = "Missing description or invalid photo"),
        (status = 403, description = "Client access required"),
        (status = 502, description = "Photo storage unavailable")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ticket(
    RequireClient(user): RequireClient,
    State(service): State<Arc<TicketService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Ticket>>)> {
    let mut description = String::new();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "issue_description" => {
                description = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read description: {}", e))
                })?;
            }
            "photo" => photo = PhotoUpload::from_field(field).await?,
            other => debug!("Ignoring unknown field: {}", other),
        }
    }

    let ticket = service.create_ticket(&user, &description, photo).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ticket),
            Some("Ticket submitted".to_string()),
            None,
        )),
    ))
}

/// The client's own tickets, newest first
#[utoipa::path(
    get,
    path = "/api/tickets",
    responses(
        (status = 200, description = "Non-archived tickets of the client", body = ApiResponse<Vec<Ticket>>),
        (status = 403, description = "Client access required")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_tickets(
    RequireClient(user): RequireClient,
    State(service): State<Arc<TicketService>>,
) -> Result<Json<ApiResponse<Vec<Ticket>>>> {
    let tickets = service.list_client_tickets(user.account_id()?).await?;
    let total = tickets.len();
    Ok(Json(ApiResponse::success(
        Some(tickets),
        None,
        Some(Meta::total(total)),
    )))
}

/// Archive a completed ticket
#[utoipa::path(
    put,
    path = "/api/tickets/{id}/archive",
    params(
        ("id" = Uuid, Path, description = "Ticket id")
    ),
    responses(
        (status = 200, description = "Ticket archived", body = ApiResponse<Ticket>),
        (status = 403, description = "Client access required"),
        (status = 404, description = "Ticket not found"),
        (status = 409, description = "Ticket is not completed")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn archive_ticket(
    RequireClient(user): RequireClient,
    State(service): State<Arc<TicketService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Ticket>>> {
    let ticket = service.archive_ticket(user.account_id()?, id).await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        Some("Ticket archived".to_string()),
        None,
    )))
}

/// Manager messages on a ticket
#[utoipa::path(
    get,
    path = "/api/tickets/{id}/messages",
    params(
        ("id" = Uuid, Path, description = "Ticket id")
    ),
    responses(
        (status = 200, description = "Messages, oldest first", body = ApiResponse<Vec<TicketMessage>>),
        (status = 403, description = "Client or manager access required"),
        (status = 404, description = "Ticket not found")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_messages(
    user: AuthenticatedUser,
    State(service): State<Arc<TicketService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TicketMessage>>>> {
    if !(user.is_client() || user.has_manager_access()) {
        return Err(AppError::Forbidden(
            "Client or manager access required".to_string(),
        ));
    }
    let messages = service.list_messages(&user, id).await?;
    let total = messages.len();
    Ok(Json(ApiResponse::success(
        Some(messages),
        None,
        Some(Meta::total(total)),
    )))
}

/// Live feed of the client's tickets
#[utoipa::path(
    get,
    path = "/api/tickets/stream",
    responses(
        (status = 200, description = "SSE stream: `snapshot`, then `prepend` and `replace` events", content_type = "text/event-stream"),
        (status = 403, description = "Client access required")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn client_ticket_stream(
    RequireClient(user): RequireClient,
    State(service): State<Arc<TicketService>>,
) -> Result<Response> {
    let audience = BoardAudience::Client(user.account_id()?);
    let (initial, updates) = service.board_stream(audience).await?;
    Ok(board_sse(initial, updates))
}
