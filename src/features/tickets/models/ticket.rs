use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::lifecycle::LifecycleState;

/// Ticket status matching the `ticket_status` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "ticket_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Pending,
    Assigned,
    Completed,
    Archived,
}

impl TicketStatus {
    /// Still waiting on the manager
    pub fn is_active(self) -> bool {
        matches!(self, TicketStatus::Pending | TicketStatus::Assigned)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Pending => write!(f, "pending"),
            TicketStatus::Assigned => write!(f, "assigned"),
            TicketStatus::Completed => write!(f, "completed"),
            TicketStatus::Archived => write!(f, "archived"),
        }
    }
}

impl LifecycleState for TicketStatus {
    const RECORD: &'static str = "Ticket";

    fn successors(self) -> &'static [Self] {
        match self {
            TicketStatus::Pending => &[TicketStatus::Assigned, TicketStatus::Completed],
            TicketStatus::Assigned => &[TicketStatus::Assigned, TicketStatus::Completed],
            TicketStatus::Completed => &[TicketStatus::Archived],
            TicketStatus::Archived => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ticket {
    pub id: Uuid,
    pub client_user_id: Uuid,
    /// Display name of the client company
    pub client_name: String,
    pub issue_description: String,
    pub photo_url: Option<String>,
    pub status: TicketStatus,
    /// Latest manager comment
    pub status_reason: Option<String>,
    pub archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub client_user_id: Uuid,
    pub client_name: String,
    pub issue_description: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TicketMessage {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub sender_role: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
