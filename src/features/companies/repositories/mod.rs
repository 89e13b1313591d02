mod company_repository;
#[cfg(test)]
mod memory;

pub use company_repository::{CompanyRepository, PgCompanyRepository};
#[cfg(test)]
pub use memory::MemoryCompanyRepository;
