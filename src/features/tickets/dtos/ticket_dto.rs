use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::tickets::models::TicketStatus;

/// Multipart form for a new ticket. Documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateTicketFormDto {
    #[schema(example = "La climatisation de la salle B ne démarre plus")]
    pub issue_description: String,
    /// Optional photo of the problem
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentTicketDto {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetTicketStatusDto {
    pub status: TicketStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReasonDto {
    /// New comment; `null` or blank clears it
    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TicketStatusQuery {
    /// Only tickets with this status
    pub status: Option<TicketStatus>,
}
