mod ticket_repository;
#[cfg(test)]
mod memory;

pub use ticket_repository::{PgTicketRepository, TicketRepository};
#[cfg(test)]
pub use memory::MemoryTicketRepository;
