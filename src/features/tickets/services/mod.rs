mod ticket_service;

pub use ticket_service::{BoardStream, TicketService};
