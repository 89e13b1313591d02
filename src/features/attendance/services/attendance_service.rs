use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::features::attendance::models::{AttendanceEntry, CheckInOutcome, CheckOutOutcome};
use crate::features::attendance::repositories::AttendanceRepository;
use crate::shared::validation::EMPLOYEE_NAME_REGEX;

/// Attendance sheet of one day
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyAttendance {
    pub date: NaiveDate,
    pub present_count: usize,
    pub missing_checkouts: usize,
    pub records: Vec<AttendanceEntry>,
}

pub struct AttendanceService {
    repository: Arc<dyn AttendanceRepository>,
}

fn employee_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Employee name is required".to_string()));
    }
    if !EMPLOYEE_NAME_REGEX.is_match(name) {
        return Err(AppError::Validation(format!(
            "Invalid employee name '{}'",
            name
        )));
    }
    Ok(name.to_string())
}

fn minutes(at: NaiveTime) -> String {
    at.format("%H:%M").to_string()
}

impl AttendanceService {
    pub fn new(repository: Arc<dyn AttendanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn check_in(
        &self,
        company_id: i64,
        employee: &str,
        date: NaiveDate,
        at: NaiveTime,
    ) -> Result<CheckInOutcome> {
        let name = employee_name(employee)?;

        if let Some(existing) = self.repository.find(company_id, &name, date).await? {
            debug!(
                "Already checked in: company={}, employee={}, date={}",
                company_id, name, date
            );
            return Ok(CheckInOutcome::AlreadyCheckedIn {
                checkin_time: Some(existing.checkin_time),
            });
        }

        match self
            .repository
            .insert(company_id, &name, date, &minutes(at))
            .await
        {
            Ok(record) => {
                info!(
                    "Check-in: company={}, employee={}, date={}, time={}",
                    company_id, name, date, record.checkin_time
                );
                Ok(CheckInOutcome::CheckedIn {
                    checkin_time: record.checkin_time,
                })
            }
            // A second request for the same employee landed first
            Err(e) if e.is_conflict() => {
                let existing = self.repository.find(company_id, &name, date).await?;
                Ok(CheckInOutcome::AlreadyCheckedIn {
                    checkin_time: existing.map(|r| r.checkin_time),
                })
            }
            Err(e) => Err(e),
        }
    }

    pub async fn check_out(
        &self,
        company_id: i64,
        employee: &str,
        date: NaiveDate,
        at: NaiveTime,
    ) -> Result<CheckOutOutcome> {
        let name = employee_name(employee)?;

        match self
            .repository
            .close(company_id, &name, date, &minutes(at))
            .await?
        {
            Some(record) => {
                let checkout_time = record.checkout_time.unwrap_or_else(|| minutes(at));
                info!(
                    "Check-out: company={}, employee={}, date={}, time={}",
                    company_id, name, date, checkout_time
                );
                Ok(CheckOutOutcome::CheckedOut { checkout_time })
            }
            None => {
                debug!(
                    "Nothing to close: company={}, employee={}, date={}",
                    company_id, name, date
                );
                Ok(CheckOutOutcome::NothingToClose)
            }
        }
    }

    pub async fn list_for_date(&self, date: NaiveDate) -> Result<DailyAttendance> {
        let records = self.repository.list_for_date(date).await?;
        Ok(DailyAttendance {
            date,
            present_count: records.len(),
            missing_checkouts: records.iter().filter(|r| r.checkout_time.is_none()).count(),
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::attendance::repositories::MemoryAttendanceRepository;
    use tokio_test::{assert_err, assert_ok};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 42).unwrap()
    }

    fn service() -> (Arc<MemoryAttendanceRepository>, AttendanceService) {
        let repo = Arc::new(MemoryAttendanceRepository::new());
        (repo.clone(), AttendanceService::new(repo))
    }

    #[tokio::test]
    async fn test_check_in_twice_keeps_first_time() {
        let (repo, service) = service();
        let date = d("2025-12-03");

        let first = service.check_in(2, " Marie Curie ", date, t(7, 5)).await.unwrap();
        assert_eq!(
            first,
            CheckInOutcome::CheckedIn {
                checkin_time: "07:05".to_string()
            }
        );

        let second = service.check_in(2, "Marie Curie", date, t(9, 30)).await.unwrap();
        assert_eq!(
            second,
            CheckInOutcome::AlreadyCheckedIn {
                checkin_time: Some("07:05".to_string())
            }
        );
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_lost_insert_race_reports_stored_time() {
        let (repo, service) = service();
        let date = d("2025-12-03");
        repo.race_next_insert(2, "Paul", date, "06:58");

        let outcome = service.check_in(2, "Paul", date, t(7, 0)).await.unwrap();
        assert_eq!(
            outcome,
            CheckInOutcome::AlreadyCheckedIn {
                checkin_time: Some("06:58".to_string())
            }
        );
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_same_name_on_other_lot_or_day_is_separate() {
        let (repo, service) = service();
        assert_ok!(service.check_in(1, "Ali", d("2025-12-03"), t(7, 0)).await);
        assert_ok!(service.check_in(2, "Ali", d("2025-12-03"), t(7, 0)).await);
        assert_ok!(service.check_in(1, "Ali", d("2025-12-04"), t(7, 0)).await);
        assert_eq!(repo.count(), 3);
    }

    #[tokio::test]
    async fn test_check_out_without_check_in_changes_nothing() {
        let (repo, service) = service();
        let outcome = service
            .check_out(3, "Nadia", d("2025-12-03"), t(17, 0))
            .await
            .unwrap();
        assert_eq!(outcome, CheckOutOutcome::NothingToClose);
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_check_out_closes_once() {
        let (_repo, service) = service();
        let date = d("2025-12-03");
        service.check_in(3, "Nadia", date, t(7, 0)).await.unwrap();

        let first = service.check_out(3, "Nadia", date, t(16, 45)).await.unwrap();
        assert_eq!(
            first,
            CheckOutOutcome::CheckedOut {
                checkout_time: "16:45".to_string()
            }
        );
        let second = service.check_out(3, "Nadia", date, t(17, 10)).await.unwrap();
        assert_eq!(second, CheckOutOutcome::NothingToClose);

        let day = service.list_for_date(date).await.unwrap();
        assert_eq!(day.records[0].checkout_time.as_deref(), Some("16:45"));
    }

    #[tokio::test]
    async fn test_blank_or_invalid_name_is_rejected() {
        let (repo, service) = service();
        let date = d("2025-12-03");
        assert!(matches!(
            service.check_in(1, "   ", date, t(7, 0)).await,
            Err(AppError::Validation(_))
        ));
        assert_err!(service.check_in(1, "1234", date, t(7, 0)).await);
        assert_err!(service.check_out(1, "", date, t(7, 0)).await);
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_daily_sheet_counts() {
        let (_repo, service) = service();
        let date = d("2025-12-03");
        service.check_in(1, "Ali", date, t(6, 50)).await.unwrap();
        service.check_in(4, "Bea", date, t(7, 20)).await.unwrap();
        service.check_in(4, "Chloé", date, t(7, 10)).await.unwrap();
        service.check_in(4, "Dan", d("2025-12-04"), t(7, 0)).await.unwrap();
        service.check_out(4, "Bea", date, t(16, 0)).await.unwrap();

        let day = service.list_for_date(date).await.unwrap();
        assert_eq!(day.present_count, 3);
        assert_eq!(day.missing_checkouts, 2);
        let names: Vec<_> = day.records.iter().map(|r| r.employee_name.as_str()).collect();
        assert_eq!(names, ["Bea", "Chloé", "Ali"]);
    }
}
