mod admin_ticket_handler;
mod client_ticket_handler;
mod manager_ticket_handler;
mod stream;

pub use admin_ticket_handler::*;
pub use client_ticket_handler::*;
pub use manager_ticket_handler::*;
