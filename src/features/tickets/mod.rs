//! Client tickets: issues raised by client accounts and handled by managers.
//!
//! A ticket starts `pending`, becomes `assigned` once a manager comments, then
//! `completed`. The client archives a completed ticket to hide it. Every write
//! goes out on the ticket change feed so open boards update live over SSE.
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | GET/POST | `/api/tickets` | client |
//! | GET | `/api/tickets/stream` | client |
//! | PUT | `/api/tickets/{id}/archive` | client |
//! | GET | `/api/tickets/{id}/messages` | client (own), manager, admin |
//! | GET | `/api/manager/tickets` | manager, admin |
//! | GET | `/api/manager/tickets/stream` | manager, admin |
//! | POST | `/api/manager/tickets/{id}/comments` | manager, admin |
//! | PUT | `/api/manager/tickets/{id}/complete` | manager, admin |
//! | GET | `/api/admin/tickets?status=` | admin |
//! | PUT | `/api/admin/tickets/{id}/status` | admin |
//! | PUT | `/api/admin/tickets/{id}/reason` | admin |
//! | DELETE | `/api/admin/tickets/{id}` | admin |

pub mod board;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgTicketRepository;
pub use services::TicketService;
