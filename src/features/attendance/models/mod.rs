mod attendance;

pub use attendance::{AttendanceEntry, AttendanceRecord, CheckInOutcome, CheckOutOutcome};
