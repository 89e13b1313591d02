//! Lots (companies) and their shared employee passwords.
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | GET | `/api/companies` | any authenticated user |
//! | POST | `/api/admin/companies` | admin |
//! | PUT | `/api/admin/companies/{id}/password` | admin |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CompanyRepository, PgCompanyRepository};
pub use services::CompanyService;
