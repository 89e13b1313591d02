//! Daily tasks of each lot.
//!
//! Templates repeat on a four-week rotation; instances for a day are created
//! from them on first view and reset when the day is validated.
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | GET | `/api/rotation?date=` | any authenticated user |
//! | GET | `/api/companies/{company_id}/tasks?date=` | lot employee, admin |
//! | PATCH | `/api/companies/{company_id}/tasks/{id}` | lot employee, admin |
//! | POST | `/api/companies/{company_id}/tasks/validate?date=` | lot employee, admin |
//! | GET | `/api/companies/{company_id}/tasks/history?from=&to=` | lot employee, admin |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod rotation;
pub mod routes;
pub mod services;

pub use repositories::PgTaskRepository;
pub use rotation::RotationCalculator;
pub use services::TaskService;
