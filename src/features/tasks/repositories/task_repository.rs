use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::db_error;
use crate::core::error::Result;
use crate::features::tasks::models::{
    NewTaskHistory, NewTaskInstance, TaskHistory, TaskInstance, TaskPatch, TaskTemplate,
};
use crate::shared::types::DateRange;

const INSTANCE_COLUMNS: &str = "id, company_id, task_name, day_of_week, week_number, execution_date, \
     completed, start_time, end_time, remarks, created_at";

const HISTORY_COLUMNS: &str = "id, original_task_id, company_id, task_name, day_of_week, week_number, \
     execution_date, completed, start_time, end_time, remarks, archived_at";

/// Storage boundary for task templates, daily instances and task history
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list_templates(
        &self,
        company_id: i64,
        week_number: i16,
        day_of_week: &str,
    ) -> Result<Vec<TaskTemplate>>;

    async fn list_instances(&self, company_id: i64, date: NaiveDate) -> Result<Vec<TaskInstance>>;

    /// Instances in `range`, for one lot or all of them
    async fn list_instances_between(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<TaskInstance>>;

    /// Fails with `Conflict` when (company, task name, date) already exists
    async fn insert_instance(&self, task: NewTaskInstance) -> Result<TaskInstance>;

    async fn delete_instances(&self, ids: &[Uuid]) -> Result<u64>;

    async fn find_instance(&self, id: Uuid) -> Result<Option<TaskInstance>>;

    async fn update_instance(&self, id: Uuid, patch: TaskPatch) -> Result<Option<TaskInstance>>;

    /// Clear completion, times and remarks of every instance for the day
    async fn reset_instances(&self, company_id: i64, date: NaiveDate) -> Result<u64>;

    async fn delete_history(&self, company_id: i64, date: NaiveDate) -> Result<u64>;

    async fn insert_history(&self, rows: Vec<NewTaskHistory>) -> Result<u64>;

    async fn list_history(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<TaskHistory>>;
}

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list_templates(
        &self,
        company_id: i64,
        week_number: i16,
        day_of_week: &str,
    ) -> Result<Vec<TaskTemplate>> {
        sqlx::query_as::<_, TaskTemplate>(
            r#"
            SELECT id, company_id, task_name, day_of_week, week_number
            FROM tasks
            WHERE company_id = $1
              AND week_number = $2
              AND day_of_week = $3
              AND execution_date IS NULL
            ORDER BY task_name
            "#,
        )
        .bind(company_id)
        .bind(week_number)
        .bind(day_of_week)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list task templates", e))
    }

    async fn list_instances(&self, company_id: i64, date: NaiveDate) -> Result<Vec<TaskInstance>> {
        sqlx::query_as::<_, TaskInstance>(&format!(
            "SELECT {} FROM tasks WHERE company_id = $1 AND execution_date = $2 ORDER BY task_name",
            INSTANCE_COLUMNS
        ))
        .bind(company_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list task instances", e))
    }

    async fn list_instances_between(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<TaskInstance>> {
        sqlx::query_as::<_, TaskInstance>(&format!(
            r#"
            SELECT {} FROM tasks
            WHERE execution_date BETWEEN $1 AND $2
              AND ($3::BIGINT IS NULL OR company_id = $3)
            ORDER BY execution_date, company_id, task_name
            "#,
            INSTANCE_COLUMNS
        ))
        .bind(range.from)
        .bind(range.to)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list task instances in range", e))
    }

    async fn insert_instance(&self, task: NewTaskInstance) -> Result<TaskInstance> {
        sqlx::query_as::<_, TaskInstance>(&format!(
            r#"
            INSERT INTO tasks (id, company_id, task_name, day_of_week, week_number, execution_date, completed)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(task.company_id)
        .bind(&task.task_name)
        .bind(&task.day_of_week)
        .bind(task.week_number)
        .bind(task.execution_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert task instance", e))
    }

    async fn delete_instances(&self, ids: &[Uuid]) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM tasks WHERE id = ANY($1) AND execution_date IS NOT NULL")
                .bind(ids)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to delete task instances", e))?;

        Ok(result.rows_affected())
    }

    async fn find_instance(&self, id: Uuid) -> Result<Option<TaskInstance>> {
        sqlx::query_as::<_, TaskInstance>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND execution_date IS NOT NULL",
            INSTANCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get task instance", e))
    }

    async fn update_instance(&self, id: Uuid, patch: TaskPatch) -> Result<Option<TaskInstance>> {
        sqlx::query_as::<_, TaskInstance>(&format!(
            r#"
            UPDATE tasks SET
                completed = COALESCE($2, completed),
                start_time = CASE WHEN $3 THEN $4 ELSE start_time END,
                end_time = CASE WHEN $5 THEN $6 ELSE end_time END,
                remarks = CASE WHEN $7 THEN $8 ELSE remarks END
            WHERE id = $1 AND execution_date IS NOT NULL
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        ))
        .bind(id)
        .bind(patch.completed)
        .bind(patch.start_time.is_some())
        .bind(patch.start_time.flatten())
        .bind(patch.end_time.is_some())
        .bind(patch.end_time.flatten())
        .bind(patch.remarks.is_some())
        .bind(patch.remarks.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update task instance", e))
    }

    async fn reset_instances(&self, company_id: i64, date: NaiveDate) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET completed = FALSE, start_time = NULL, end_time = NULL, remarks = NULL
            WHERE company_id = $1 AND execution_date = $2
            "#,
        )
        .bind(company_id)
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to reset task instances", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_history(&self, company_id: i64, date: NaiveDate) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM task_history WHERE company_id = $1 AND execution_date = $2")
                .bind(company_id)
                .bind(date)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to delete task history", e))?;

        Ok(result.rows_affected())
    }

    async fn insert_history(&self, rows: Vec<NewTaskHistory>) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO task_history (id, original_task_id, company_id, task_name, day_of_week, \
             week_number, execution_date, completed, start_time, end_time, remarks) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(Uuid::now_v7())
                .push_bind(row.original_task_id)
                .push_bind(row.company_id)
                .push_bind(row.task_name)
                .push_bind(row.day_of_week)
                .push_bind(row.week_number)
                .push_bind(row.execution_date)
                .push_bind(row.completed)
                .push_bind(row.start_time)
                .push_bind(row.end_time)
                .push_bind(row.remarks);
        });

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to insert task history", e))?;

        Ok(result.rows_affected())
    }

    async fn list_history(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<TaskHistory>> {
        sqlx::query_as::<_, TaskHistory>(&format!(
            r#"
            SELECT {} FROM task_history
            WHERE execution_date BETWEEN $1 AND $2
              AND ($3::BIGINT IS NULL OR company_id = $3)
            ORDER BY execution_date DESC, company_id, task_name
            "#,
            HISTORY_COLUMNS
        ))
        .bind(range.from)
        .bind(range.to)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list task history", e))
    }
}
