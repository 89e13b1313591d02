mod task_repository;
#[cfg(test)]
mod memory;

pub use task_repository::{PgTaskRepository, TaskRepository};
#[cfg(test)]
pub use memory::MemoryTaskRepository;
