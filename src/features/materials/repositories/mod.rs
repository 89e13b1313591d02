mod material_repository;
#[cfg(test)]
mod memory;

pub use material_repository::{MaterialRepository, PgMaterialRepository};
#[cfg(test)]
pub use memory::MemoryMaterialRepository;
