mod damage_report_service;

pub use damage_report_service::{DamageForm, DamageReportService};
