//! Daily damage reports filed by lot employees.
//!
//! A lot has at most one open draft per working day. Submitting writes the report
//! straight into `damage_history` and removes the draft; day validation sweeps any
//! submitted and archived live rows into history as well.
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | GET/PUT | `/api/companies/{company_id}/damage-reports/draft?date=` | lot employee, admin |
//! | POST | `/api/companies/{company_id}/damage-reports/submit?date=` | lot employee, admin |
//! | GET | `/api/companies/{company_id}/damage-reports/drafts` | lot employee, admin |
//! | GET | `/api/companies/{company_id}/damage-reports/history?from=&to=` | lot employee, admin |
//! | PUT | `/api/companies/{company_id}/damage-reports/{id}/date` | lot employee, admin |
//! | DELETE | `/api/companies/{company_id}/damage-reports/{id}` | lot employee, admin |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgDamageReportRepository;
pub use services::DamageReportService;
