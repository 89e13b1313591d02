//! Application accounts: admin, manager, inventory worker and clients.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/clients` | List client accounts |
//! | POST | `/api/admin/clients` | Create a client account |
//! | DELETE | `/api/admin/clients/{id}` | Delete a client account |
//! | PUT | `/api/admin/clients/{id}/password` | Reset a client password |
//! | PUT | `/api/admin/accounts/{account}/password` | Change the manager or inventory password |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgUserRepository, UserRepository};
pub use services::AccountService;
