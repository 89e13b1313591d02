//! Live ticket lists driven by the ticket change feed.
//!
//! A subscriber gets the current list once, then only the deltas relevant to
//! it. `TicketBoard` mirrors what the subscriber holds so deltas that would not
//! change that list are never sent.

use serde::Serialize;
use uuid::Uuid;

use crate::features::tickets::models::{Ticket, TicketStatus};
use crate::modules::realtime::{ChangeEvent, ChangeKind};

/// Who a board is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAudience {
    /// Pending and assigned tickets of every client
    Manager,
    /// The non-archived tickets of one client account
    Client(Uuid),
}

impl BoardAudience {
    /// Translate a raw change into the delta this audience should apply, if any.
    /// A ticket leaving the audience's list (completed, archived or deleted) is a
    /// `Remove`, so live boards agree with a fresh snapshot.
    pub fn project(&self, event: &ChangeEvent<Ticket>) -> Option<BoardUpdate> {
        let ticket = &event.record;
        let remove = || BoardUpdate::Remove { id: ticket.id };
        match (self, event.kind) {
            (BoardAudience::Client(client_id), _) if ticket.client_user_id != *client_id => None,
            (_, ChangeKind::Delete) => Some(remove()),
            (BoardAudience::Manager, ChangeKind::Insert) => {
                (ticket.status == TicketStatus::Pending).then(|| BoardUpdate::Prepend(ticket.clone()))
            }
            (BoardAudience::Manager, ChangeKind::Update) => match ticket.status {
                TicketStatus::Pending | TicketStatus::Assigned => {
                    Some(BoardUpdate::Replace(ticket.clone()))
                }
                TicketStatus::Completed | TicketStatus::Archived => Some(remove()),
            },
            (BoardAudience::Client(_), ChangeKind::Insert) => {
                Some(BoardUpdate::Prepend(ticket.clone()))
            }
            (BoardAudience::Client(_), ChangeKind::Update) => {
                if ticket.status == TicketStatus::Archived {
                    Some(remove())
                } else {
                    Some(BoardUpdate::Replace(ticket.clone()))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "ticket", rename_all = "snake_case")]
pub enum BoardUpdate {
    /// New ticket at the top of the list
    Prepend(Ticket),
    /// Swap the ticket with the same id in place
    Replace(Ticket),
    /// Drop the ticket from the list
    Remove { id: Uuid },
}

impl BoardUpdate {
    /// SSE event name
    pub fn event_name(&self) -> &'static str {
        match self {
            BoardUpdate::Prepend(_) => "prepend",
            BoardUpdate::Replace(_) => "replace",
            BoardUpdate::Remove { .. } => "remove",
        }
    }
}

/// Ordered ticket list, newest first. The last update for an id wins.
#[derive(Debug, Clone, Default)]
pub struct TicketBoard {
    tickets: Vec<Ticket>,
}

impl TicketBoard {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Apply a delta. Returns `false` when the board is unchanged.
    pub fn apply(&mut self, update: &BoardUpdate) -> bool {
        match update {
            BoardUpdate::Prepend(ticket) => {
                match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
                    Some(existing) if existing == ticket => return false,
                    Some(existing) => *existing = ticket.clone(),
                    None => self.tickets.insert(0, ticket.clone()),
                }
                true
            }
            BoardUpdate::Replace(ticket) => match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
                Some(existing) if existing != ticket => {
                    *existing = ticket.clone();
                    true
                }
                _ => false,
            },
            BoardUpdate::Remove { id } => {
                let before = self.tickets.len();
                self.tickets.retain(|t| t.id != *id);
                self.tickets.len() != before
            }
        }
    }
}
