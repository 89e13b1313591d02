mod user_repository;
#[cfg(test)]
mod memory;

pub use user_repository::{PgUserRepository, UserRepository};
#[cfg(test)]
pub use memory::MemoryUserRepository;
