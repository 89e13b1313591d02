mod damage_report_repository;
#[cfg(test)]
mod memory;

pub use damage_report_repository::{DamageReportRepository, PgDamageReportRepository};
#[cfg(test)]
pub use memory::MemoryDamageReportRepository;
