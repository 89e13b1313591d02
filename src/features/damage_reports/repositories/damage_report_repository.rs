use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::db_error;
use crate::core::error::Result;
use crate::features::damage_reports::models::{
    DamageHistory, DamageReport, DamageStatus, DraftChanges, NewDamageDraft, NewDamageHistory,
};
use crate::shared::types::DateRange;

const REPORT_COLUMNS: &str = "id, company_id, description, start_time, end_time, before_photo_url, \
     after_photo_url, status, archived, report_date, created_at, updated_at";

const HISTORY_COLUMNS: &str = "id, original_damage_id, company_id, description, start_time, end_time, \
     before_photo_url, after_photo_url, report_date, created_at";

/// Storage boundary for live damage reports and damage history
#[async_trait]
pub trait DamageReportRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<DamageReport>>;

    /// The non-archived draft for (company, date), if any
    async fn find_open_draft(&self, company_id: i64, date: NaiveDate)
        -> Result<Option<DamageReport>>;

    /// Fails with `Conflict` when an open draft already exists for the slot
    async fn insert_draft(&self, draft: NewDamageDraft) -> Result<DamageReport>;

    async fn update_draft(&self, id: Uuid, changes: DraftChanges) -> Result<Option<DamageReport>>;

    /// Fails with `Conflict` when the target date already has an open draft
    async fn move_draft(&self, id: Uuid, date: NaiveDate) -> Result<Option<DamageReport>>;

    async fn list_drafts(&self, company_id: i64) -> Result<Vec<DamageReport>>;

    /// Submitted and archived live reports waiting to be copied to history
    async fn list_archivable(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<DamageReport>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64>;

    async fn delete_history_for(&self, original_ids: &[Uuid]) -> Result<u64>;

    async fn insert_history(&self, rows: Vec<NewDamageHistory>) -> Result<Vec<DamageHistory>>;

    async fn list_history(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<DamageHistory>>;
}

pub struct PgDamageReportRepository {
    pool: PgPool,
}

impl PgDamageReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DamageReportRepository for PgDamageReportRepository {
    async fn find(&self, id: Uuid) -> Result<Option<DamageReport>> {
        sqlx::query_as::<_, DamageReport>(&format!(
            "SELECT {} FROM damage_reports WHERE id = $1",
            REPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get damage report", e))
    }

    async fn find_open_draft(
        &self,
        company_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DamageReport>> {
        sqlx::query_as::<_, DamageReport>(&format!(
            r#"
            SELECT {} FROM damage_reports
            WHERE company_id = $1 AND report_date = $2 AND status = $3 AND archived = FALSE
            "#,
            REPORT_COLUMNS
        ))
        .bind(company_id)
        .bind(date)
        .bind(DamageStatus::Draft)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get open draft", e))
    }

    async fn insert_draft(&self, draft: NewDamageDraft) -> Result<DamageReport> {
        sqlx::query_as::<_, DamageReport>(&format!(
            r#"
            INSERT INTO damage_reports (
                id, company_id, description, start_time, end_time,
                before_photo_url, after_photo_url, status, archived, report_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, $9)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(draft.company_id)
        .bind(&draft.fields.description)
        .bind(&draft.fields.start_time)
        .bind(&draft.fields.end_time)
        .bind(&draft.before_photo_url)
        .bind(&draft.after_photo_url)
        .bind(DamageStatus::Draft)
        .bind(draft.report_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert damage draft", e))
    }

    async fn update_draft(&self, id: Uuid, changes: DraftChanges) -> Result<Option<DamageReport>> {
        sqlx::query_as::<_, DamageReport>(&format!(
            r#"
            UPDATE damage_reports SET
                description = $2,
                start_time = $3,
                end_time = $4,
                before_photo_url = COALESCE($5, before_photo_url),
                after_photo_url = COALESCE($6, after_photo_url),
                updated_at = NOW()
            WHERE id = $1 AND status = $7
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(id)
        .bind(&changes.fields.description)
        .bind(&changes.fields.start_time)
        .bind(&changes.fields.end_time)
        .bind(&changes.before_photo_url)
        .bind(&changes.after_photo_url)
        .bind(DamageStatus::Draft)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update damage draft", e))
    }

    async fn move_draft(&self, id: Uuid, date: NaiveDate) -> Result<Option<DamageReport>> {
        sqlx::query_as::<_, DamageReport>(&format!(
            r#"
            UPDATE damage_reports SET report_date = $2, updated_at = NOW()
            WHERE id = $1 AND status = $3
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(id)
        .bind(date)
        .bind(DamageStatus::Draft)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to move damage draft", e))
    }

    async fn list_drafts(&self, company_id: i64) -> Result<Vec<DamageReport>> {
        sqlx::query_as::<_, DamageReport>(&format!(
            r#"
            SELECT {} FROM damage_reports
            WHERE company_id = $1 AND status = $2 AND archived = FALSE
            ORDER BY created_at DESC
            "#,
            REPORT_COLUMNS
        ))
        .bind(company_id)
        .bind(DamageStatus::Draft)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list damage drafts", e))
    }

    async fn list_archivable(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<DamageReport>> {
        sqlx::query_as::<_, DamageReport>(&format!(
            r#"
            SELECT {} FROM damage_reports
            WHERE status = $1 AND archived = TRUE
              AND report_date BETWEEN $2 AND $3
              AND ($4::BIGINT IS NULL OR company_id = $4)
            ORDER BY report_date, created_at
            "#,
            REPORT_COLUMNS
        ))
        .bind(DamageStatus::Submitted)
        .bind(range.from)
        .bind(range.to)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list archivable damage reports", e))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM damage_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete damage report", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query("DELETE FROM damage_reports WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete damage reports", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_history_for(&self, original_ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query("DELETE FROM damage_history WHERE original_damage_id = ANY($1)")
            .bind(original_ids)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete damage history", e))?;

        Ok(result.rows_affected())
    }

    async fn insert_history(&self, rows: Vec<NewDamageHistory>) -> Result<Vec<DamageHistory>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO damage_history (id, original_damage_id, company_id, description, \
             start_time, end_time, before_photo_url, after_photo_url, report_date) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(Uuid::now_v7())
                .push_bind(row.original_damage_id)
                .push_bind(row.company_id)
                .push_bind(row.fields.description)
                .push_bind(row.fields.start_time)
                .push_bind(row.fields.end_time)
                .push_bind(row.before_photo_url)
                .push_bind(row.after_photo_url)
                .push_bind(row.report_date);
        });
        builder.push(" RETURNING ");
        builder.push(HISTORY_COLUMNS);

        builder
            .build_query_as::<DamageHistory>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to insert damage history", e))
    }

    async fn list_history(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<DamageHistory>> {
        sqlx::query_as::<_, DamageHistory>(&format!(
            r#"
            SELECT {} FROM damage_history
            WHERE report_date BETWEEN $1 AND $2
              AND ($3::BIGINT IS NULL OR company_id = $3)
            ORDER BY report_date DESC, created_at DESC
            "#,
            HISTORY_COLUMNS
        ))
        .bind(range.from)
        .bind(range.to)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list damage history", e))
    }
}
