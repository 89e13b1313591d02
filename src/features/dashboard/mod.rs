//! Admin overview of task completion and damage reports across lots.
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | GET | `/api/admin/overview?mode=&from=&to=` | admin |
//! | GET | `/api/admin/overview/{company_id}?mode=&from=&to=` | admin |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::DashboardService;
