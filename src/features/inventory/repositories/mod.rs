mod inventory_repository;
#[cfg(test)]
mod memory;

pub use inventory_repository::{InventoryRepository, PgInventoryRepository};
#[cfg(test)]
pub use memory::MemoryInventoryRepository;
