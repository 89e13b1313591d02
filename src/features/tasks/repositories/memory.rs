use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::TaskRepository;
use crate::core::error::{AppError, Result};
use crate::features::tasks::models::{
    NewTaskHistory, NewTaskInstance, TaskHistory, TaskInstance, TaskPatch, TaskTemplate,
};
use crate::shared::types::DateRange;

/// In-memory tasks enforcing the (company, task name, date) uniqueness
#[derive(Default)]
pub struct MemoryTaskRepository {
    templates: Mutex<Vec<TaskTemplate>>,
    instances: Mutex<Vec<TaskInstance>>,
    history: Mutex<Vec<TaskHistory>>,
    rival: Mutex<Option<NewTaskInstance>>,
    failing_insert: Mutex<Option<String>>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_template(&self, company_id: i64, week_number: i16, day_of_week: &str, name: &str) {
        self.templates.lock().unwrap().push(TaskTemplate {
            id: Uuid::now_v7(),
            company_id,
            task_name: name.to_string(),
            day_of_week: day_of_week.to_string(),
            week_number,
        });
    }

    pub fn instance_count(&self) -> usize {
        self.instances.lock().unwrap().len()
    }

    /// Another viewer inserts `task` just before this repository's next insert
    pub fn race_next_insert(&self, task: NewTaskInstance) {
        *self.rival.lock().unwrap() = Some(task);
    }

    /// The next insert of `task_name` fails with a storage error
    pub fn fail_next_insert_of(&self, task_name: &str) {
        *self.failing_insert.lock().unwrap() = Some(task_name.to_string());
    }

    fn build_instance(task: NewTaskInstance) -> TaskInstance {
        TaskInstance {
            id: Uuid::now_v7(),
            company_id: task.company_id,
            task_name: task.task_name,
            day_of_week: task.day_of_week,
            week_number: task.week_number,
            execution_date: task.execution_date,
            completed: false,
            start_time: None,
            end_time: None,
            remarks: None,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn list_templates(
        &self,
        company_id: i64,
        week_number: i16,
        day_of_week: &str,
    ) -> Result<Vec<TaskTemplate>> {
        Ok(self
            .templates
            .lock()
            .unwrap()
            .iter()
            .filter(|t| {
                t.company_id == company_id
                    && t.week_number == week_number
                    && t.day_of_week == day_of_week
            })
            .cloned()
            .collect())
    }

    async fn list_instances(&self, company_id: i64, date: NaiveDate) -> Result<Vec<TaskInstance>> {
        let mut tasks: Vec<TaskInstance> = self
            .instances
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.company_id == company_id && t.execution_date == date)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.task_name.cmp(&b.task_name));
        Ok(tasks)
    }

    async fn list_instances_between(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<TaskInstance>> {
        Ok(self
            .instances
            .lock()
            .unwrap()
            .iter()
            .filter(|t| range.contains(t.execution_date))
            .filter(|t| company_id.map_or(true, |id| t.company_id == id))
            .cloned()
            .collect())
    }

    async fn insert_instance(&self, task: NewTaskInstance) -> Result<TaskInstance> {
        let mut instances = self.instances.lock().unwrap();
        if let Some(rival) = self.rival.lock().unwrap().take() {
            instances.push(Self::build_instance(rival));
        }
        let mut failing = self.failing_insert.lock().unwrap();
        if failing.as_deref() == Some(task.task_name.as_str()) {
            *failing = None;
            return Err(AppError::Internal("pool timed out".to_string()));
        }
        if instances.iter().any(|t| {
            t.company_id == task.company_id
                && t.task_name == task.task_name
                && t.execution_date == task.execution_date
        }) {
            return Err(AppError::Conflict(
                "Duplicate record (uq_tasks_instance)".to_string(),
            ));
        }
        let created = Self::build_instance(task);
        instances.push(created.clone());
        Ok(created)
    }

    async fn delete_instances(&self, ids: &[Uuid]) -> Result<u64> {
        let mut instances = self.instances.lock().unwrap();
        let before = instances.len();
        instances.retain(|t| !ids.contains(&t.id));
        Ok((before - instances.len()) as u64)
    }

    async fn find_instance(&self, id: Uuid) -> Result<Option<TaskInstance>> {
        Ok(self
            .instances
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn update_instance(&self, id: Uuid, patch: TaskPatch) -> Result<Option<TaskInstance>> {
        let mut instances = self.instances.lock().unwrap();
        Ok(instances.iter_mut().find(|t| t.id == id).map(|task| {
            patch.apply(task);
            task.clone()
        }))
    }

    async fn reset_instances(&self, company_id: i64, date: NaiveDate) -> Result<u64> {
        let mut count = 0;
        for task in self
            .instances
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|t| t.company_id == company_id && t.execution_date == date)
        {
            task.completed = false;
            task.start_time = None;
            task.end_time = None;
            task.remarks = None;
            count += 1;
        }
        Ok(count)
    }

    async fn delete_history(&self, company_id: i64, date: NaiveDate) -> Result<u64> {
        let mut history = self.history.lock().unwrap();
        let before = history.len();
        history.retain(|h| !(h.company_id == company_id && h.execution_date == date));
        Ok((before - history.len()) as u64)
    }

    async fn insert_history(&self, rows: Vec<NewTaskHistory>) -> Result<u64> {
        let mut history = self.history.lock().unwrap();
        let count = rows.len() as u64;
        history.extend(rows.into_iter().map(|row| TaskHistory {
            id: Uuid::now_v7(),
            original_task_id: Some(row.original_task_id),
            company_id: row.company_id,
            task_name: row.task_name,
            day_of_week: row.day_of_week,
            week_number: row.week_number,
            execution_date: row.execution_date,
            completed: row.completed,
            start_time: row.start_time,
            end_time: row.end_time,
            remarks: row.remarks,
            archived_at: Utc::now(),
        }));
        Ok(count)
    }

    async fn list_history(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<TaskHistory>> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|h| range.contains(h.execution_date))
            .filter(|h| company_id.map_or(true, |id| h.company_id == id))
            .cloned()
            .collect())
    }
}
