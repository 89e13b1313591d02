//! Site stock recorded by the inventory worker and curated by the admin.
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | POST | `/api/inventory` | inventory worker, admin |
//! | GET | `/api/admin/inventory?search=` | admin |
//! | PATCH/DELETE | `/api/admin/inventory/{id}` | admin |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgInventoryRepository;
pub use services::InventoryService;
