use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::db_error;
use crate::core::error::Result;
use crate::features::attendance::models::{AttendanceEntry, AttendanceRecord};

const COLUMNS: &str = "id, company_id, employee_name, checkin_date, checkin_time, checkout_time, created_at, updated_at";

/// Storage boundary for employee check-ins
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>>;

    /// Fails with a conflict when the employee already has a record for the day
    async fn insert(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
        checkin_time: &str,
    ) -> Result<AttendanceRecord>;

    /// Set the checkout time of the day's record if it is still open
    async fn close(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
        checkout_time: &str,
    ) -> Result<Option<AttendanceRecord>>;

    /// Every record of a day, latest check-in first
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<AttendanceEntry>>;
}

pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    async fn find(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {COLUMNS} FROM attendance WHERE company_id = $1 AND employee_name = $2 AND checkin_date = $3"
        ))
        .bind(company_id)
        .bind(employee_name)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get attendance record", e))
    }

    async fn insert(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
        checkin_time: &str,
    ) -> Result<AttendanceRecord> {
        sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            INSERT INTO attendance (id, company_id, employee_name, checkin_date, checkin_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(company_id)
        .bind(employee_name)
        .bind(date)
        .bind(checkin_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record check-in", e))
    }

    async fn close(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
        checkout_time: &str,
    ) -> Result<Option<AttendanceRecord>> {
        sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            UPDATE attendance
            SET checkout_time = $4, updated_at = NOW()
            WHERE company_id = $1 AND employee_name = $2 AND checkin_date = $3
              AND checkout_time IS NULL
            RETURNING {COLUMNS}
            "#
        ))
        .bind(company_id)
        .bind(employee_name)
        .bind(date)
        .bind(checkout_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record check-out", e))
    }

    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<AttendanceEntry>> {
        sqlx::query_as::<_, AttendanceEntry>(
            r#"
            SELECT a.id, a.company_id, c.name AS company_name, a.employee_name,
                   a.checkin_date, a.checkin_time, a.checkout_time
            FROM attendance a
            JOIN companies c ON c.id = a.company_id
            WHERE a.checkin_date = $1
            ORDER BY a.checkin_time DESC, a.employee_name
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list attendance", e))
    }
}
