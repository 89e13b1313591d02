//! Employee presence: one check-in and at most one check-out per employee, lot
//! and day.
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | POST | `/api/companies/{company_id}/attendance/check-in?date=` | lot employee, admin |
//! | POST | `/api/companies/{company_id}/attendance/check-out?date=` | lot employee, admin |
//! | GET | `/api/admin/attendance?date=` | admin |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgAttendanceRepository;
pub use services::AttendanceService;
