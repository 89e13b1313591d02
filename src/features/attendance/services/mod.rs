mod attendance_service;

pub use attendance_service::{AttendanceService, DailyAttendance};
