mod attendance_dto;

pub use attendance_dto::AttendanceDto;
