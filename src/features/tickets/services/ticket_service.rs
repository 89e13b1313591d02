use std::pin::Pin;
use std::sync::Arc;

use tokio_stream::{Stream, StreamExt};
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::tickets::board::{BoardAudience, BoardUpdate, TicketBoard};
use crate::features::tickets::models::{NewTicket, Ticket, TicketMessage, TicketStatus};
use crate::features::tickets::repositories::TicketRepository;
use crate::modules::realtime::{ChangeFeed, ChangeKind};
use crate::modules::storage::{ObjectStore, PhotoFolder, PhotoUpload};
use crate::shared::lifecycle::{ensure_transition, TransitionMode};

/// Board deltas for one subscriber
pub type BoardStream = Pin<Box<dyn Stream<Item = BoardUpdate> + Send>>;

pub struct TicketService {
    repository: Arc<dyn TicketRepository>,
    store: Arc<dyn ObjectStore>,
    feed: ChangeFeed<Ticket>,
}

impl TicketService {
    pub fn new(
        repository: Arc<dyn TicketRepository>,
        store: Arc<dyn ObjectStore>,
        feed: ChangeFeed<Ticket>,
    ) -> Self {
        Self {
            repository,
            store,
            feed,
        }
    }

    // ---------------------------------------------------------------------
    // Client
    // ---------------------------------------------------------------------

    /// File a new ticket. Unlike damage photos, a failed photo upload fails the request.
    pub async fn create_ticket(
        &self,
        client: &AuthenticatedUser,
        description: &str,
        photo: Option<PhotoUpload>,
    ) -> Result<Ticket> {
        let client_user_id = client.account_id()?;
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "Issue description is required".to_string(),
            ));
        }

        let photo_url = match photo {
            Some(photo) => Some(self.store.put_photo(PhotoFolder::ClientTicket, photo).await?),
            None => None,
        };

        let ticket = self
            .repository
            .insert(NewTicket {
                client_user_id,
                client_name: client.display_name.clone(),
                issue_description: description.to_string(),
                photo_url,
            })
            .await?;

        info!("Ticket created: id={}, client={}", ticket.id, ticket.client_name);
        self.feed.publish(ChangeKind::Insert, ticket.clone());
        Ok(ticket)
    }

    pub async fn list_client_tickets(&self, client_user_id: Uuid) -> Result<Vec<Ticket>> {
        self.repository.list_for_client(client_user_id).await
    }

    /// Hide a completed ticket from the client's list
    pub async fn archive_ticket(&self, client_user_id: Uuid, id: Uuid) -> Result<Ticket> {
        let ticket = self.find(id).await?;
        if ticket.client_user_id != client_user_id {
            return Err(AppError::NotFound(format!("Ticket {} not found", id)));
        }
        self.transition(ticket, TicketStatus::Archived, TransitionMode::Forward, None)
            .await
    }

    // ---------------------------------------------------------------------
    // Manager
    // ---------------------------------------------------------------------

    pub async fn list_active_tickets(&self) -> Result<Vec<Ticket>> {
        self.repository.list_active().await
    }

    /// Record a manager comment and mark the ticket as assigned
    pub async fn comment_ticket(
        &self,
        author: &AuthenticatedUser,
        id: Uuid,
        message: &str,
    ) -> Result<Ticket> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::Validation("Message must not be empty".to_string()));
        }

        let ticket = self.find(id).await?;
        ensure_transition(ticket.status, TicketStatus::Assigned, TransitionMode::Forward)?;

        self.repository
            .insert_message(id, &author.role, message)
            .await?;
        self.transition(
            ticket,
            TicketStatus::Assigned,
            TransitionMode::Forward,
            Some(message.to_string()),
        )
        .await
    }

    pub async fn complete_ticket(&self, id: Uuid) -> Result<Ticket> {
        let ticket = self.find(id).await?;
        self.transition(ticket, TicketStatus::Completed, TransitionMode::Forward, None)
            .await
    }

    /// Message thread of a ticket. Clients may only read their own tickets.
    pub async fn list_messages(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Vec<TicketMessage>> {
        let ticket = self.find(id).await?;
        if user.is_client() && Some(ticket.client_user_id) != user.account_id().ok() {
            return Err(AppError::NotFound(format!("Ticket {} not found", id)));
        }
        self.repository.list_messages(id).await
    }

    // ---------------------------------------------------------------------
    // Admin
    // ---------------------------------------------------------------------

    pub async fn list_all_tickets(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>> {
        self.repository.list_all(status).await
    }

    /// Set any status, bypassing the forward transition rules
    pub async fn set_status(&self, id: Uuid, status: TicketStatus) -> Result<Ticket> {
        let ticket = self.find(id).await?;
        self.transition(ticket, status, TransitionMode::Override, None)
            .await
    }

    /// Overwrite the manager comment. A blank reason clears it.
    pub async fn update_reason(&self, id: Uuid, reason: Option<String>) -> Result<Ticket> {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let ticket = self
            .repository
            .update_reason(id, reason)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

        self.feed.publish(ChangeKind::Update, ticket.clone());
        Ok(ticket)
    }

    pub async fn delete_ticket(&self, id: Uuid) -> Result<()> {
        let ticket = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

        info!("Ticket deleted: id={}", id);
        self.feed.publish(ChangeKind::Delete, ticket);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Realtime
    // ---------------------------------------------------------------------

    /// Current list for `audience` plus the deltas that change it from now on.
    ///
    /// The feed is subscribed before the list is read, so no write falls between
    /// the two.
    pub async fn board_stream(
        &self,
        audience: BoardAudience,
    ) -> Result<(Vec<Ticket>, BoardStream)> {
        let events = self.feed.stream();

        let initial = match audience {
            BoardAudience::Manager => self.repository.list_active().await?,
            BoardAudience::Client(client_user_id) => {
                self.repository.list_for_client(client_user_id).await?
            }
        };

        let mut board = TicketBoard::new(initial.clone());
        let updates = events.filter_map(move |event| {
            let update = audience.project(&event)?;
            board.apply(&update).then_some(update)
        });

        Ok((initial, Box::pin(updates)))
    }

    async fn find(&self, id: Uuid) -> Result<Ticket> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))
    }

    async fn transition(
        &self,
        ticket: Ticket,
        to: TicketStatus,
        mode: TransitionMode,
        reason: Option<String>,
    ) -> Result<Ticket> {
        ensure_transition(ticket.status, to, mode)?;

        let updated = self
            .repository
            .update_status(ticket.id, to, reason)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", ticket.id)))?;

        info!(
            "Ticket {} moved from {} to {}",
            updated.id, ticket.status, updated.status
        );
        self.feed.publish(ChangeKind::Update, updated.clone());
        Ok(updated)
    }
}
