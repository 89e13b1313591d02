use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::lifecycle::Snapshot;

/// Recurring task definition: a `tasks` row with no execution date
#[derive(Debug, Clone, FromRow)]
pub struct TaskTemplate {
    pub id: Uuid,
    pub company_id: i64,
    pub task_name: String,
    pub day_of_week: String,
    pub week_number: i16,
}

/// A template materialized for one working day
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TaskInstance {
    pub id: Uuid,
    pub company_id: i64,
    pub task_name: String,
    pub day_of_week: String,
    pub week_number: i16,
    pub execution_date: NaiveDate,
    pub completed: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTaskInstance {
    pub company_id: i64,
    pub task_name: String,
    pub day_of_week: String,
    pub week_number: i16,
    pub execution_date: NaiveDate,
}

impl NewTaskInstance {
    pub fn from_template(template: &TaskTemplate, execution_date: NaiveDate) -> Self {
        Self {
            company_id: template.company_id,
            task_name: template.task_name.clone(),
            day_of_week: template.day_of_week.clone(),
            week_number: template.week_number,
            execution_date,
        }
    }
}

/// Partial update of a task instance. `None` leaves the column unchanged;
/// `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub completed: Option<bool>,
    pub start_time: Option<Option<String>>,
    pub end_time: Option<Option<String>>,
    pub remarks: Option<Option<String>>,
}

impl TaskPatch {
    pub fn apply(&self, task: &mut TaskInstance) {
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(start_time) = &self.start_time {
            task.start_time = start_time.clone();
        }
        if let Some(end_time) = &self.end_time {
            task.end_time = end_time.clone();
        }
        if let Some(remarks) = &self.remarks {
            task.remarks = remarks.clone();
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TaskHistory {
    pub id: Uuid,
    pub original_task_id: Option<Uuid>,
    pub company_id: i64,
    pub task_name: String,
    pub day_of_week: String,
    pub week_number: i16,
    pub execution_date: NaiveDate,
    pub completed: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub remarks: Option<String>,
    pub archived_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskHistory {
    pub original_task_id: Uuid,
    pub company_id: i64,
    pub task_name: String,
    pub day_of_week: String,
    pub week_number: i16,
    pub execution_date: NaiveDate,
    pub completed: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub remarks: Option<String>,
}

impl Snapshot for TaskInstance {
    type History = NewTaskHistory;

    fn snapshot(&self) -> NewTaskHistory {
        NewTaskHistory {
            original_task_id: self.id,
            company_id: self.company_id,
            task_name: self.task_name.clone(),
            day_of_week: self.day_of_week.clone(),
            week_number: self.week_number,
            execution_date: self.execution_date,
            completed: self.completed,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            remarks: self.remarks.clone(),
        }
    }
}
