use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::AttendanceRepository;
use crate::core::error::{AppError, Result};
use crate::features::attendance::models::{AttendanceEntry, AttendanceRecord};

/// In-memory attendance. Lot names are rendered as `LOT {id}`.
pub struct MemoryAttendanceRepository {
    records: Mutex<Vec<AttendanceRecord>>,
    /// Row written by a competing request right before the next `insert`
    racing: Mutex<Option<AttendanceRecord>>,
}

impl MemoryAttendanceRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            racing: Mutex::new(None),
        }
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Make the next insert lose a race against a check-in made at `checkin_time`
    pub fn race_next_insert(&self, company_id: i64, employee_name: &str, date: NaiveDate, checkin_time: &str) {
        *self.racing.lock().unwrap() = Some(Self::record(company_id, employee_name, date, checkin_time));
    }

    fn record(company_id: i64, employee_name: &str, date: NaiveDate, checkin_time: &str) -> AttendanceRecord {
        let now = Utc::now();
        AttendanceRecord {
            id: Uuid::now_v7(),
            company_id,
            employee_name: employee_name.to_string(),
            checkin_date: date,
            checkin_time: checkin_time.to_string(),
            checkout_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn matches(record: &AttendanceRecord, company_id: i64, employee_name: &str, date: NaiveDate) -> bool {
        record.company_id == company_id
            && record.employee_name == employee_name
            && record.checkin_date == date
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendanceRepository {
    async fn find(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| Self::matches(r, company_id, employee_name, date))
            .cloned())
    }

    async fn insert(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
        checkin_time: &str,
    ) -> Result<AttendanceRecord> {
        let mut records = self.records.lock().unwrap();
        if let Some(winner) = self.racing.lock().unwrap().take() {
            records.push(winner);
        }
        if records
            .iter()
            .any(|r| Self::matches(r, company_id, employee_name, date))
        {
            return Err(AppError::Conflict(
                "Duplicate record (uq_attendance_employee_day)".to_string(),
            ));
        }
        let record = Self::record(company_id, employee_name, date, checkin_time);
        records.push(record.clone());
        Ok(record)
    }

    async fn close(
        &self,
        company_id: i64,
        employee_name: &str,
        date: NaiveDate,
        checkout_time: &str,
    ) -> Result<Option<AttendanceRecord>> {
        let mut records = self.records.lock().unwrap();
        let open = records.iter_mut().find(|r| {
            Self::matches(r, company_id, employee_name, date) && r.checkout_time.is_none()
        });
        Ok(open.map(|record| {
            record.checkout_time = Some(checkout_time.to_string());
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<AttendanceEntry>> {
        let mut entries: Vec<AttendanceEntry> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.checkin_date == date)
            .map(|r| AttendanceEntry {
                id: r.id,
                company_id: r.company_id,
                company_name: format!("LOT {}", r.company_id),
                employee_name: r.employee_name.clone(),
                checkin_date: r.checkin_date,
                checkin_time: r.checkin_time.clone(),
                checkout_time: r.checkout_time.clone(),
            })
            .collect();
        entries.sort_by(|a, b| {
            b.checkin_time
                .cmp(&a.checkin_time)
                .then_with(|| a.employee_name.cmp(&b.employee_name))
        });
        Ok(entries)
    }
}
