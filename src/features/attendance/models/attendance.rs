use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One employee's presence on one day for one lot
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub company_id: i64,
    pub employee_name: String,
    pub checkin_date: NaiveDate,
    /// `HH:MM`
    pub checkin_time: String,
    /// `HH:MM`, unset until the employee ends the day
    pub checkout_time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attendance row joined with its lot name
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendanceEntry {
    pub id: Uuid,
    pub company_id: i64,
    pub company_name: String,
    pub employee_name: String,
    pub checkin_date: NaiveDate,
    pub checkin_time: String,
    pub checkout_time: Option<String>,
}

/// Result of a check-in. Checking in twice is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckInOutcome {
    CheckedIn { checkin_time: String },
    /// The time is unknown only when a concurrent check-in won and could not be read back
    AlreadyCheckedIn { checkin_time: Option<String> },
}

/// Result of a check-out. Nothing to close is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutOutcome {
    CheckedOut { checkout_time: String },
    NothingToClose,
}
