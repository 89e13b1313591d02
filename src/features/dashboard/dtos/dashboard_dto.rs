use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::damage_reports::models::{DamageHistory, DamageReport};
use crate::features::tasks::models::{TaskHistory, TaskInstance};
use crate::shared::types::{DateRange, DateRangeQuery};

/// Which tables the overview reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverviewMode {
    /// Live task instances and submitted damage reports not yet swept into history
    #[default]
    Current,
    /// Validated days only
    History,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct OverviewQuery {
    /// `current` (default) or `history`
    #[serde(default)]
    pub mode: OverviewMode,
    /// First day (YYYY-MM-DD)
    pub from: NaiveDate,
    /// Last day, inclusive; defaults to `from`
    pub to: Option<NaiveDate>,
}

impl OverviewQuery {
    pub fn into_parts(self) -> Result<(OverviewMode, DateRange)> {
        let range = DateRangeQuery {
            from: self.from,
            to: self.to,
        }
        .into_range()?;
        Ok((self.mode, range))
    }
}

/// Numbers for one lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CompanyOverview {
    pub company_id: i64,
    pub company_name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Percentage of completed tasks, rounded; 0 without tasks
    pub completion_rate: u32,
    /// Tasks validated without being completed; always 0 in `current` mode
    pub tasks_missing: usize,
    pub damage_reports: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewDto {
    pub mode: OverviewMode,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub companies: Vec<CompanyOverview>,
}

/// Task line as shown in the overview detail, live or archived
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TaskRow {
    pub id: Uuid,
    pub task_name: String,
    pub execution_date: NaiveDate,
    pub completed: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub remarks: Option<String>,
}

impl From<TaskInstance> for TaskRow {
    fn from(task: TaskInstance) -> Self {
        Self {
            id: task.id,
            task_name: task.task_name,
            execution_date: task.execution_date,
            completed: task.completed,
            start_time: task.start_time,
            end_time: task.end_time,
            remarks: task.remarks,
        }
    }
}

impl From<TaskHistory> for TaskRow {
    fn from(task: TaskHistory) -> Self {
        Self {
            id: task.id,
            task_name: task.task_name,
            execution_date: task.execution_date,
            completed: task.completed,
            start_time: task.start_time,
            end_time: task.end_time,
            remarks: task.remarks,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DamageRow {
    pub id: Uuid,
    pub report_date: NaiveDate,
    pub description: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
}

impl From<DamageReport> for DamageRow {
    fn from(report: DamageReport) -> Self {
        Self {
            id: report.id,
            report_date: report.report_date,
            description: report.description,
            start_time: report.start_time,
            end_time: report.end_time,
            before_photo_url: report.before_photo_url,
            after_photo_url: report.after_photo_url,
        }
    }
}

impl From<DamageHistory> for DamageRow {
    fn from(report: DamageHistory) -> Self {
        Self {
            id: report.id,
            report_date: report.report_date,
            description: report.description,
            start_time: report.start_time,
            end_time: report.end_time,
            before_photo_url: report.before_photo_url,
            after_photo_url: report.after_photo_url,
        }
    }
}

/// Rows behind one lot's overview numbers
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyDetailDto {
    pub mode: OverviewMode,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub summary: CompanyOverview,
    pub tasks: Vec<TaskRow>,
    pub damage_reports: Vec<DamageRow>,
}
