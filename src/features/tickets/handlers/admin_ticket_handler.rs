use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::tickets::dtos::{SetTicketStatusDto, TicketStatusQuery, UpdateReasonDto};
use crate::features::tickets::models::Ticket;
use crate::features::tickets::services::TicketService;
use crate::shared::csv_export::{sheet_date, CsvSheet};
use crate::shared::types::{ApiResponse, Meta};

/// Every ticket, optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/admin/tickets",
    params(TicketStatusQuery),
    responses(
        (status = 200, description = "Tickets, newest first", body = ApiResponse<Vec<Ticket>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_all_tickets(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<TicketService>>,
    AppQuery(query): AppQuery<TicketStatusQuery>,
) -> Result<Json<ApiResponse<Vec<Ticket>>>> {
    let tickets = service.list_all_tickets(query.status).await?;
    let total = tickets.len();
    Ok(Json(ApiResponse::success(
        Some(tickets),
        None,
        Some(Meta::total(total)),
    )))
}

/// Force a ticket status
#[utoipa::path(
    put,
    path = "/api/admin/tickets/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Ticket id")
    ),
    request_body = SetTicketStatusDto,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<Ticket>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Ticket not found")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_ticket_status(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<TicketService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SetTicketStatusDto>,
) -> Result<Json<ApiResponse<Ticket>>> {
    let ticket = service.set_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        Some(format!("Status changed to {}", dto.status)),
        None,
    )))
}

/// Rewrite the manager comment of a ticket
#[utoipa::path(
    put,
    path = "/api/admin/tickets/{id}/reason",
    params(
        ("id" = Uuid, Path, description = "Ticket id")
    ),
    request_body = UpdateReasonDto,
    responses(
        (status = 200, description = "Comment updated", body = ApiResponse<Ticket>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Ticket not found")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_ticket_reason(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<TicketService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateReasonDto>,
) -> Result<Json<ApiResponse<Ticket>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ticket = service.update_reason(id, dto.reason).await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        Some("Comment updated".to_string()),
        None,
    )))
}

/// Delete a ticket
#[utoipa::path(
    delete,
    path = "/api/admin/tickets/{id}",
    params(
        ("id" = Uuid, Path, description = "Ticket id")
    ),
    responses(
        (status = 200, description = "Ticket deleted", body = ApiResponse<()>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Ticket not found")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ticket(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<TicketService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_ticket(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Ticket deleted".to_string()),
        None,
    )))
}

/// Download tickets as a CSV sheet, optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/admin/tickets/export",
    params(TicketStatusQuery),
    responses(
        (status = 200, description = "Ticket sheet, newest first", body = String, content_type = "text/csv"),
        (status = 403, description = "Admin access required")
    ),
    tag = "tickets",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_tickets(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<TicketService>>,
    AppQuery(query): AppQuery<TicketStatusQuery>,
) -> Result<CsvSheet> {
    let tickets = service.list_all_tickets(query.status).await?;
    CsvSheet::build(
        format!("tickets_{}.csv", Local::now().date_naive()),
        b';',
        &["ID", "Client", "Description", "Soumis le", "Statut", "Commentaire"],
        tickets.into_iter().map(|t| {
            [
                t.id.to_string(),
                t.client_name,
                t.issue_description,
                sheet_date(t.submitted_at),
                t.status.to_string(),
                t.status_reason.unwrap_or_default(),
            ]
        }),
    )
}
