use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::db_error;
use crate::core::error::Result;
use crate::features::tickets::models::{NewTicket, Ticket, TicketMessage, TicketStatus};

const TICKET_COLUMNS: &str = "id, client_user_id, client_name, issue_description, photo_url, \
     status, status_reason, archived, archived_at, submitted_at, updated_at";

/// Storage boundary for client tickets and their message thread
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket>;

    async fn find(&self, id: Uuid) -> Result<Option<Ticket>>;

    /// Non-archived tickets of one client, newest first
    async fn list_for_client(&self, client_user_id: Uuid) -> Result<Vec<Ticket>>;

    /// Non-archived pending or assigned tickets, newest first
    async fn list_active(&self) -> Result<Vec<Ticket>>;

    async fn list_all(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>>;

    /// Set the status; `archived`/`archived_at` follow it. A `Some` reason
    /// replaces `status_reason`.
    async fn update_status(
        &self,
        id: Uuid,
        status: TicketStatus,
        reason: Option<String>,
    ) -> Result<Option<Ticket>>;

    async fn update_reason(&self, id: Uuid, reason: Option<String>) -> Result<Option<Ticket>>;

    /// Delete and return the removed row
    async fn delete(&self, id: Uuid) -> Result<Option<Ticket>>;

    async fn insert_message(
        &self,
        ticket_id: Uuid,
        sender_role: &str,
        message: &str,
    ) -> Result<TicketMessage>;

    async fn list_messages(&self, ticket_id: Uuid) -> Result<Vec<TicketMessage>>;
}

pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            INSERT INTO client_tickets (id, client_user_id, client_name, issue_description, photo_url, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            TICKET_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(ticket.client_user_id)
        .bind(&ticket.client_name)
        .bind(&ticket.issue_description)
        .bind(&ticket.photo_url)
        .bind(TicketStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert ticket", e))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {} FROM client_tickets WHERE id = $1",
            TICKET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get ticket", e))
    }

    async fn list_for_client(&self, client_user_id: Uuid) -> Result<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            SELECT {} FROM client_tickets
            WHERE client_user_id = $1 AND archived = FALSE
            ORDER BY submitted_at DESC
            "#,
            TICKET_COLUMNS
        ))
        .bind(client_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list client tickets", e))
    }

    async fn list_active(&self) -> Result<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            SELECT {} FROM client_tickets
            WHERE archived = FALSE AND status IN ($1, $2)
            ORDER BY submitted_at DESC
            "#,
            TICKET_COLUMNS
        ))
        .bind(TicketStatus::Pending)
        .bind(TicketStatus::Assigned)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list active tickets", e))
    }

    async fn list_all(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            SELECT {} FROM client_tickets
            WHERE ($1::ticket_status IS NULL OR status = $1)
            ORDER BY submitted_at DESC
            "#,
            TICKET_COLUMNS
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list tickets", e))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TicketStatus,
        reason: Option<String>,
    ) -> Result<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            UPDATE client_tickets SET
                status = $2,
                archived = ($2 = 'archived'::ticket_status),
                archived_at = CASE
                    WHEN $2 = 'archived'::ticket_status THEN COALESCE(archived_at, NOW())
                    ELSE NULL
                END,
                status_reason = COALESCE($3, status_reason),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TICKET_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update ticket status", e))
    }

    async fn update_reason(&self, id: Uuid, reason: Option<String>) -> Result<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            UPDATE client_tickets SET status_reason = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TICKET_COLUMNS
        ))
        .bind(id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update ticket comment", e))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            "DELETE FROM client_tickets WHERE id = $1 RETURNING {}",
            TICKET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete ticket", e))
    }

    async fn insert_message(
        &self,
        ticket_id: Uuid,
        sender_role: &str,
        message: &str,
    ) -> Result<TicketMessage> {
        sqlx::query_as::<_, TicketMessage>(
            r#"
            INSERT INTO ticket_messages (id, ticket_id, sender_role, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, ticket_id, sender_role, message, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(ticket_id)
        .bind(sender_role)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert ticket message", e))
    }

    async fn list_messages(&self, ticket_id: Uuid) -> Result<Vec<TicketMessage>> {
        sqlx::query_as::<_, TicketMessage>(
            r#"
            SELECT id, ticket_id, sender_role, message, created_at
            FROM ticket_messages
            WHERE ticket_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list ticket messages", e))
    }
}
