use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::damage_reports::models::{
    DamageFields, DamageHistory, DamageReport, DamageStatus, DraftChanges, NewDamageDraft,
    NewDamageHistory,
};
use crate::features::damage_reports::repositories::DamageReportRepository;
use crate::modules::storage::{ObjectStore, PhotoFolder, PhotoUpload};
use crate::shared::lifecycle::{ensure_transition, snapshot_all, TransitionMode};
use crate::shared::types::DateRange;
use crate::shared::validation::normalize_time;

/// Damage form as received from an employee, photos not yet stored
#[derive(Debug, Clone, Default)]
pub struct DamageForm {
    pub fields: DamageFields,
    pub before_photo: Option<PhotoUpload>,
    pub after_photo: Option<PhotoUpload>,
}

pub struct DamageReportService {
    repository: Arc<dyn DamageReportRepository>,
    store: Arc<dyn ObjectStore>,
}

impl DamageReportService {
    pub fn new(repository: Arc<dyn DamageReportRepository>, store: Arc<dyn ObjectStore>) -> Self {
        Self { repository, store }
    }

    pub async fn get_draft(&self, company_id: i64, date: NaiveDate) -> Result<Option<DamageReport>> {
        self.repository.find_open_draft(company_id, date).await
    }

    /// Update the open draft for (company, date), or create it.
    pub async fn save_draft(
        &self,
        company_id: i64,
        date: NaiveDate,
        form: DamageForm,
    ) -> Result<DamageReport> {
        let fields = normalize_fields(form.fields)?;
        let (before_photo_url, after_photo_url) =
            self.upload_photos(form.before_photo, form.after_photo).await;

        let changes = DraftChanges {
            fields,
            before_photo_url,
            after_photo_url,
        };

        if let Some(draft) = self.repository.find_open_draft(company_id, date).await? {
            return self.update_existing(draft, changes).await;
        }

        let inserted = self
            .repository
            .insert_draft(NewDamageDraft {
                company_id,
                report_date: date,
                fields: changes.fields.clone(),
                before_photo_url: changes.before_photo_url.clone(),
                after_photo_url: changes.after_photo_url.clone(),
            })
            .await;

        match inserted {
            Ok(draft) => {
                info!(
                    "Damage draft created: id={}, company={}, date={}",
                    draft.id, company_id, date
                );
                Ok(draft)
            }
            // Another request created the draft first: save onto it
            Err(e) if e.is_conflict() => {
                let draft = self
                    .repository
                    .find_open_draft(company_id, date)
                    .await?
                    .ok_or(e)?;
                self.update_existing(draft, changes).await
            }
            Err(e) => Err(e),
        }
    }

    async fn update_existing(&self, draft: DamageReport, changes: DraftChanges) -> Result<DamageReport> {
        ensure_transition(draft.status, DamageStatus::Draft, TransitionMode::Forward)?;
        let updated = self
            .repository
            .update_draft(draft.id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Damage draft {} not found", draft.id)))?;

        debug!("Damage draft updated: id={}", updated.id);
        Ok(updated)
    }

    /// Record the report in history, then remove the open draft for the slot.
    pub async fn submit(
        &self,
        company_id: i64,
        date: NaiveDate,
        form: DamageForm,
    ) -> Result<DamageHistory> {
        let fields = normalize_fields(form.fields)?;
        if fields.description.is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }

        let (before_photo_url, after_photo_url) =
            self.upload_photos(form.before_photo, form.after_photo).await;

        let draft = self.repository.find_open_draft(company_id, date).await?;
        if let Some(draft) = &draft {
            ensure_transition(draft.status, DamageStatus::Submitted, TransitionMode::Forward)?;
        }

        let row = NewDamageHistory {
            original_damage_id: draft.as_ref().map(|d| d.id),
            company_id,
            report_date: date,
            fields,
            before_photo_url: before_photo_url
                .or_else(|| draft.as_ref().and_then(|d| d.before_photo_url.clone())),
            after_photo_url: after_photo_url
                .or_else(|| draft.as_ref().and_then(|d| d.after_photo_url.clone())),
        };

        let history = self
            .repository
            .insert_history(vec![row])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Internal("Damage history insert returned no row".to_string()))?;

        if let Some(draft) = draft {
            if !self.repository.delete(draft.id).await? {
                debug!("Damage draft {} was already removed", draft.id);
            }
        }

        info!(
            "Damage report submitted: history_id={}, company={}, date={}",
            history.id, company_id, date
        );
        Ok(history)
    }

    pub async fn list_drafts(&self, company_id: i64) -> Result<Vec<DamageReport>> {
        self.repository.list_drafts(company_id).await
    }

    /// Reassign a draft of `company_id` to another day
    pub async fn move_draft(&self, company_id: i64, id: Uuid, date: NaiveDate) -> Result<DamageReport> {
        let report = self.find_owned(company_id, id).await?;
        ensure_transition(report.status, DamageStatus::Draft, TransitionMode::Forward)?;

        let moved = self
            .repository
            .move_draft(id, date)
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    AppError::Conflict(format!("A draft already exists for {}", date))
                } else {
                    e
                }
            })?
            .ok_or_else(|| AppError::NotFound(format!("Damage draft {} not found", id)))?;

        info!(
            "Damage draft moved: id={}, from={}, to={}",
            id, report.report_date, date
        );
        Ok(moved)
    }

    pub async fn delete_report(&self, company_id: i64, id: Uuid) -> Result<()> {
        self.find_owned(company_id, id).await?;
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Damage report {} not found", id)));
        }

        info!("Damage report deleted: id={}", id);
        Ok(())
    }

    pub async fn list_history(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<DamageHistory>> {
        self.repository.list_history(company_id, range).await
    }

    /// Live reports that are submitted and flagged archived, not yet moved to history
    pub async fn list_pending_archive(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<DamageReport>> {
        self.repository.list_archivable(company_id, range).await
    }

    /// Move the submitted+archived live reports of a day into history and clear them.
    /// Earlier history copies of the same reports are replaced, so a retry never
    /// duplicates them.
    pub async fn archive_day(&self, company_id: i64, date: NaiveDate) -> Result<usize> {
        let reports = self
            .repository
            .list_archivable(Some(company_id), DateRange::single(date))
            .await?;
        if reports.is_empty() {
            return Ok(0);
        }

        let ids: Vec<Uuid> = reports.iter().map(|r| r.id).collect();
        self.repository.delete_history_for(&ids).await?;
        self.repository.insert_history(snapshot_all(&reports)).await?;
        self.repository.delete_many(&ids).await?;

        info!(
            "Archived {} damage report(s) for company={}, date={}",
            reports.len(),
            company_id,
            date
        );
        Ok(reports.len())
    }

    async fn find_owned(&self, company_id: i64, id: Uuid) -> Result<DamageReport> {
        self.repository
            .find(id)
            .await?
            .filter(|r| r.company_id == company_id)
            .ok_or_else(|| AppError::NotFound(format!("Damage report {} not found", id)))
    }

    async fn upload_photos(
        &self,
        before: Option<PhotoUpload>,
        after: Option<PhotoUpload>,
    ) -> (Option<String>, Option<String>) {
        tokio::join!(
            self.upload_best_effort(PhotoFolder::DamageBefore, before),
            self.upload_best_effort(PhotoFolder::DamageAfter, after),
        )
    }

    /// A failed upload leaves the URL unset; the report itself is still saved
    async fn upload_best_effort(&self, folder: PhotoFolder, photo: Option<PhotoUpload>) -> Option<String> {
        let photo = photo?;
        match self.store.put_photo(folder, photo).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Photo upload to {} failed: {}", folder.as_path(), e);
                None
            }
        }
    }
}

fn normalize_fields(fields: DamageFields) -> Result<DamageFields> {
    Ok(DamageFields {
        description: fields.description.trim().to_string(),
        start_time: normalize_time("start_time", fields.start_time)?,
        end_time: normalize_time("end_time", fields.end_time)?,
    })
}
