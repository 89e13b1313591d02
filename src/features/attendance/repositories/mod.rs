mod attendance_repository;
#[cfg(test)]
mod memory;

pub use attendance_repository::{AttendanceRepository, PgAttendanceRepository};
#[cfg(test)]
pub use memory::MemoryAttendanceRepository;
