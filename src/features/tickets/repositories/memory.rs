use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::TicketRepository;
use crate::core::error::Result;
use crate::features::tickets::models::{NewTicket, Ticket, TicketMessage, TicketStatus};

#[derive(Default)]
pub struct MemoryTicketRepository {
    tickets: Mutex<Vec<Ticket>>,
    messages: Mutex<Vec<TicketMessage>>,
}

impl MemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(mut tickets: Vec<Ticket>) -> Vec<Ticket> {
        tickets.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        tickets
    }

    fn modify(&self, id: Uuid, change: impl FnOnce(&mut Ticket)) -> Option<Ticket> {
        let mut tickets = self.tickets.lock().unwrap();
        tickets.iter_mut().find(|t| t.id == id).map(|ticket| {
            change(ticket);
            ticket.updated_at = Utc::now();
            ticket.clone()
        })
    }
}

#[async_trait]
impl TicketRepository for MemoryTicketRepository {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket> {
        let mut tickets = self.tickets.lock().unwrap();
        // Strictly increasing timestamps keep "newest first" deterministic
        let now = Utc::now() + Duration::milliseconds(tickets.len() as i64);
        let created = Ticket {
            id: Uuid::now_v7(),
            client_user_id: ticket.client_user_id,
            client_name: ticket.client_name,
            issue_description: ticket.issue_description,
            photo_url: ticket.photo_url,
            status: TicketStatus::Pending,
            status_reason: None,
            archived: false,
            archived_at: None,
            submitted_at: now,
            updated_at: now,
        };
        tickets.push(created.clone());
        Ok(created)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Ticket>> {
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list_for_client(&self, client_user_id: Uuid) -> Result<Vec<Ticket>> {
        let tickets = self.tickets.lock().unwrap();
        Ok(Self::newest_first(
            tickets
                .iter()
                .filter(|t| t.client_user_id == client_user_id && !t.archived)
                .cloned()
                .collect(),
        ))
    }

    async fn list_active(&self) -> Result<Vec<Ticket>> {
        let tickets = self.tickets.lock().unwrap();
        Ok(Self::newest_first(
            tickets
                .iter()
                .filter(|t| !t.archived && t.status.is_active())
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>> {
        let tickets = self.tickets.lock().unwrap();
        Ok(Self::newest_first(
            tickets
                .iter()
                .filter(|t| status.map_or(true, |s| t.status == s))
                .cloned()
                .collect(),
        ))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TicketStatus,
        reason: Option<String>,
    ) -> Result<Option<Ticket>> {
        Ok(self.modify(id, |ticket| {
            ticket.status = status;
            ticket.archived = status == TicketStatus::Archived;
            ticket.archived_at = if ticket.archived {
                ticket.archived_at.or_else(|| Some(Utc::now()))
            } else {
                None
            };
            if reason.is_some() {
                ticket.status_reason = reason;
            }
        }))
    }

    async fn update_reason(&self, id: Uuid, reason: Option<String>) -> Result<Option<Ticket>> {
        Ok(self.modify(id, |ticket| ticket.status_reason = reason))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Ticket>> {
        let mut tickets = self.tickets.lock().unwrap();
        let position = tickets.iter().position(|t| t.id == id);
        Ok(position.map(|i| tickets.remove(i)))
    }

    async fn insert_message(
        &self,
        ticket_id: Uuid,
        sender_role: &str,
        message: &str,
    ) -> Result<TicketMessage> {
        let created = TicketMessage {
            id: Uuid::now_v7(),
            ticket_id,
            sender_role: sender_role.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_messages(&self, ticket_id: Uuid) -> Result<Vec<TicketMessage>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.ticket_id == ticket_id)
            .cloned()
            .collect())
    }
}
