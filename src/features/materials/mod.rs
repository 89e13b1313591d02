//! Material requests raised by the site manager.
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | GET/POST | `/api/manager/materials` | manager, admin |
//! | GET | `/api/admin/materials` | admin |
//! | PUT | `/api/admin/materials/{id}/fulfilled` | admin |
//! | DELETE | `/api/admin/materials/{id}` | admin |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgMaterialRepository;
pub use services::MaterialService;
