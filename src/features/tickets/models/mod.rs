mod ticket;

pub use ticket::{NewTicket, Ticket, TicketMessage, TicketStatus};
