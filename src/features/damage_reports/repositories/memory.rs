use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::DamageReportRepository;
use crate::core::error::{AppError, Result};
use crate::features::damage_reports::models::{
    DamageHistory, DamageReport, DamageStatus, DraftChanges, NewDamageDraft, NewDamageHistory,
};
use crate::shared::types::DateRange;

/// In-memory damage reports enforcing one open draft per (company, date)
#[derive(Default)]
pub struct MemoryDamageReportRepository {
    reports: Mutex<Vec<DamageReport>>,
    history: Mutex<Vec<DamageHistory>>,
}

impl MemoryDamageReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a live report that was submitted and flagged archived
    pub fn add_archivable(&self, company_id: i64, date: NaiveDate, description: &str) -> Uuid {
        let now = Utc::now();
        let id = Uuid::now_v7();
        self.reports.lock().unwrap().push(DamageReport {
            id,
            company_id,
            description: description.to_string(),
            start_time: None,
            end_time: None,
            before_photo_url: None,
            after_photo_url: None,
            status: DamageStatus::Submitted,
            archived: true,
            report_date: date,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn live_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    pub fn history_rows(&self) -> Vec<DamageHistory> {
        self.history.lock().unwrap().clone()
    }

    fn is_open_draft(report: &DamageReport, company_id: i64, date: NaiveDate) -> bool {
        report.company_id == company_id
            && report.report_date == date
            && report.status == DamageStatus::Draft
            && !report.archived
    }
}

#[async_trait]
impl DamageReportRepository for MemoryDamageReportRepository {
    async fn find(&self, id: Uuid) -> Result<Option<DamageReport>> {
        Ok(self.reports.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_open_draft(
        &self,
        company_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DamageReport>> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| Self::is_open_draft(r, company_id, date))
            .cloned())
    }

    async fn insert_draft(&self, draft: NewDamageDraft) -> Result<DamageReport> {
        let mut reports = self.reports.lock().unwrap();
        if reports
            .iter()
            .any(|r| Self::is_open_draft(r, draft.company_id, draft.report_date))
        {
            return Err(AppError::Conflict(
                "Duplicate record (uq_damage_reports_open_draft)".to_string(),
            ));
        }
        let now = Utc::now();
        let report = DamageReport {
            id: Uuid::now_v7(),
            company_id: draft.company_id,
            description: draft.fields.description,
            start_time: draft.fields.start_time,
            end_time: draft.fields.end_time,
            before_photo_url: draft.before_photo_url,
            after_photo_url: draft.after_photo_url,
            status: DamageStatus::Draft,
            archived: false,
            report_date: draft.report_date,
            created_at: now,
            updated_at: now,
        };
        reports.push(report.clone());
        Ok(report)
    }

    async fn update_draft(&self, id: Uuid, changes: DraftChanges) -> Result<Option<DamageReport>> {
        let mut reports = self.reports.lock().unwrap();
        Ok(reports
            .iter_mut()
            .find(|r| r.id == id && r.status == DamageStatus::Draft)
            .map(|r| {
                r.description = changes.fields.description;
                r.start_time = changes.fields.start_time;
                r.end_time = changes.fields.end_time;
                if changes.before_photo_url.is_some() {
                    r.before_photo_url = changes.before_photo_url;
                }
                if changes.after_photo_url.is_some() {
                    r.after_photo_url = changes.after_photo_url;
                }
                r.updated_at = Utc::now();
                r.clone()
            }))
    }

    async fn move_draft(&self, id: Uuid, date: NaiveDate) -> Result<Option<DamageReport>> {
        let mut reports = self.reports.lock().unwrap();
        let Some(company_id) = reports
            .iter()
            .find(|r| r.id == id && r.status == DamageStatus::Draft)
            .map(|r| r.company_id)
        else {
            return Ok(None);
        };
        if reports
            .iter()
            .any(|r| r.id != id && Self::is_open_draft(r, company_id, date))
        {
            return Err(AppError::Conflict(
                "Duplicate record (uq_damage_reports_open_draft)".to_string(),
            ));
        }
        Ok(reports.iter_mut().find(|r| r.id == id).map(|r| {
            r.report_date = date;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn list_drafts(&self, company_id: i64) -> Result<Vec<DamageReport>> {
        let mut drafts: Vec<DamageReport> = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.company_id == company_id && r.status == DamageStatus::Draft && !r.archived)
            .cloned()
            .collect();
        drafts.reverse();
        Ok(drafts)
    }

    async fn list_archivable(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<DamageReport>> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status == DamageStatus::Submitted && r.archived)
            .filter(|r| range.contains(r.report_date))
            .filter(|r| company_id.map_or(true, |id| r.company_id == id))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut reports = self.reports.lock().unwrap();
        let before = reports.len();
        reports.retain(|r| r.id != id);
        Ok(reports.len() < before)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        let mut reports = self.reports.lock().unwrap();
        let before = reports.len();
        reports.retain(|r| !ids.contains(&r.id));
        Ok((before - reports.len()) as u64)
    }

    async fn delete_history_for(&self, original_ids: &[Uuid]) -> Result<u64> {
        let mut history = self.history.lock().unwrap();
        let before = history.len();
        history.retain(|h| {
            h.original_damage_id
                .map_or(true, |id| !original_ids.contains(&id))
        });
        Ok((before - history.len()) as u64)
    }

    async fn insert_history(&self, rows: Vec<NewDamageHistory>) -> Result<Vec<DamageHistory>> {
        let created: Vec<DamageHistory> = rows
            .into_iter()
            .map(|row| DamageHistory {
                id: Uuid::now_v7(),
                original_damage_id: row.original_damage_id,
                company_id: row.company_id,
                description: row.fields.description,
                start_time: row.fields.start_time,
                end_time: row.fields.end_time,
                before_photo_url: row.before_photo_url,
                after_photo_url: row.after_photo_url,
                report_date: row.report_date,
                created_at: Utc::now(),
            })
            .collect();
        self.history.lock().unwrap().extend(created.iter().cloned());
        Ok(created)
    }

    async fn list_history(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<DamageHistory>> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|h| range.contains(h.report_date))
            .filter(|h| company_id.map_or(true, |id| h.company_id == id))
            .cloned()
            .collect())
    }
}
