use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::damage_reports::DamageReportService;
use crate::features::tasks::dtos::{DayValidationSummary, UpdateTaskDto};
use crate::features::tasks::models::{NewTaskInstance, TaskHistory, TaskInstance, TaskPatch};
use crate::features::tasks::repositories::TaskRepository;
use crate::features::tasks::rotation::{RotationCalculator, RotationSlot};
use crate::shared::lifecycle::snapshot_all;
use crate::shared::types::DateRange;
use crate::shared::validation::normalize_time;

pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    damage_reports: Arc<DamageReportService>,
    rotation: RotationCalculator,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        damage_reports: Arc<DamageReportService>,
        rotation: RotationCalculator,
    ) -> Self {
        Self {
            repository,
            damage_reports,
            rotation,
        }
    }

    pub fn slot_for(&self, date: NaiveDate) -> RotationSlot {
        self.rotation.slot_for(date)
    }

    /// Task instances of a lot for a day, created from the rotation templates on
    /// first access.
    pub async fn materialize_day(&self, company_id: i64, date: NaiveDate) -> Result<Vec<TaskInstance>> {
        let existing = self.repository.list_instances(company_id, date).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let slot = self.rotation.slot_for(date);
        let templates = self
            .repository
            .list_templates(company_id, slot.week_number, slot.day_name)
            .await?;
        if templates.is_empty() {
            debug!(
                "No templates for company={}, week={}, day={}",
                company_id, slot.week_number, slot.day_name
            );
            return Ok(Vec::new());
        }

        let inserts = templates.iter().map(|template| {
            self.repository
                .insert_instance(NewTaskInstance::from_template(template, date))
        });

        // Every insert runs to completion so a lost race on one task never
        // leaves the others unwritten.
        let mut created = Vec::with_capacity(templates.len());
        let mut raced = false;
        let mut failure = None;
        for result in join_all(inserts).await {
            match result {
                Ok(task) => created.push(task),
                Err(e) if e.is_conflict() => raced = true,
                Err(e) => {
                    failure.get_or_insert(e);
                }
            }
        }

        if let Some(e) = failure {
            // A partial day would be returned verbatim by every later view
            if !created.is_empty() {
                let ids: Vec<Uuid> = created.iter().map(|t| t.id).collect();
                if let Err(cleanup) = self.repository.delete_instances(&ids).await {
                    warn!(
                        "Failed to remove partial tasks for company={}, date={}: {}",
                        company_id, date, cleanup
                    );
                }
            }
            return Err(e);
        }

        if raced {
            debug!(
                "Tasks for company={}, date={} partly materialized by another viewer, re-reading",
                company_id, date
            );
            return self.repository.list_instances(company_id, date).await;
        }

        created.sort_by(|a, b| a.task_name.cmp(&b.task_name));
        info!(
            "Materialized {} task(s) for company={}, date={} (week {}, {})",
            created.len(),
            company_id,
            date,
            slot.week_number,
            slot.day_name
        );
        Ok(created)
    }

    pub async fn update_task(
        &self,
        company_id: i64,
        id: Uuid,
        dto: UpdateTaskDto,
    ) -> Result<TaskInstance> {
        self.repository
            .find_instance(id)
            .await?
            .filter(|t| t.company_id == company_id)
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

        let patch = TaskPatch {
            completed: dto.completed,
            start_time: dto
                .start_time
                .map(|v| normalize_time("start_time", v))
                .transpose()?,
            end_time: dto
                .end_time
                .map(|v| normalize_time("end_time", v))
                .transpose()?,
            remarks: dto.remarks.map(|v| {
                v.map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
            }),
        };

        let task = self
            .repository
            .update_instance(id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

        debug!("Task updated: id={}, completed={}", task.id, task.completed);
        Ok(task)
    }

    /// Close a working day: snapshot tasks into history, sweep archived damage
    /// reports into history, then reset the day's task instances.
    ///
    /// The steps are independent writes. Each one starts by clearing what a
    /// previous attempt may have written, so the whole sequence can be retried.
    pub async fn validate_day(&self, company_id: i64, date: NaiveDate) -> Result<DayValidationSummary> {
        let instances = self.repository.list_instances(company_id, date).await?;
        if !instances.is_empty() {
            self.repository.delete_history(company_id, date).await?;
            self.repository
                .insert_history(snapshot_all(&instances))
                .await?;
        }

        let archived_damage_reports = self.damage_reports.archive_day(company_id, date).await?;

        self.repository.reset_instances(company_id, date).await?;

        let summary = DayValidationSummary {
            total_tasks: instances.len(),
            completed_tasks: instances.iter().filter(|t| t.completed).count(),
            archived_damage_reports,
        };

        info!(
            "Day validated: company={}, date={}, tasks={}/{}, damage_reports={}",
            company_id,
            date,
            summary.completed_tasks,
            summary.total_tasks,
            summary.archived_damage_reports
        );
        Ok(summary)
    }

    pub async fn list_history(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<TaskHistory>> {
        self.repository.list_history(company_id, range).await
    }

    /// Live instances over a range, without materializing missing days
    pub async fn list_instances(
        &self,
        company_id: Option<i64>,
        range: DateRange,
    ) -> Result<Vec<TaskInstance>> {
        self.repository.list_instances_between(company_id, range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::damage_reports::repositories::MemoryDamageReportRepository;
    use crate::features::tasks::repositories::MemoryTaskRepository;
    use crate::modules::storage::MemoryObjectStore;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        tasks: Arc<MemoryTaskRepository>,
        damages: Arc<MemoryDamageReportRepository>,
        service: TaskService,
    }

    fn fixture() -> Fixture {
        let tasks = Arc::new(MemoryTaskRepository::new());
        let damages = Arc::new(MemoryDamageReportRepository::new());
        let damage_service = Arc::new(DamageReportService::new(
            damages.clone(),
            Arc::new(MemoryObjectStore::new()),
        ));
        let service = TaskService::new(
            tasks.clone(),
            damage_service,
            RotationCalculator::new(d("2025-12-01")),
        );
        Fixture {
            tasks,
            damages,
            service,
        }
    }

    /// 2025-12-03 is the Wednesday of rotation week 1
    fn seed_wednesday(fx: &Fixture, count: usize) {
        for i in 0..count {
            fx.tasks
                .add_template(1, 1, "mercredi", &format!("Tâche {}", i + 1));
        }
        fx.tasks.add_template(1, 2, "mercredi", "Semaine 2");
        fx.tasks.add_template(2, 1, "mercredi", "Autre lot");
    }

    #[tokio::test]
    async fn test_materialize_twice_yields_same_instances() {
        let fx = fixture();
        seed_wednesday(&fx, 3);
        let date = d("2025-12-03");

        let first = fx.service.materialize_day(1, date).await.unwrap();
        let second = fx.service.materialize_day(1, date).await.unwrap();

        assert_eq!(first.len(), 3);
        let ids = |tasks: &[TaskInstance]| tasks.iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(fx.tasks.instance_count(), 3);
        assert!(first
            .iter()
            .all(|t| t.week_number == 1 && t.day_of_week == "mercredi" && !t.completed));
    }

    #[tokio::test]
    async fn test_materialize_without_templates_is_empty() {
        let fx = fixture();
        seed_wednesday(&fx, 2);
        let tasks = fx.service.materialize_day(1, d("2025-12-04")).await.unwrap();
        assert!(tasks.is_empty());
        assert_eq!(fx.tasks.instance_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_materialization_creates_one_set() {
        let fx = fixture();
        seed_wednesday(&fx, 4);
        let date = d("2025-12-03");

        let (a, b) = tokio::join!(
            fx.service.materialize_day(1, date),
            fx.service.materialize_day(1, date)
        );

        assert_eq!(a.unwrap().len(), 4);
        assert_eq!(b.unwrap().len(), 4);
        assert_eq!(fx.tasks.instance_count(), 4);
    }

    #[tokio::test]
    async fn test_update_task_validates_and_scopes_to_company() {
        let fx = fixture();
        seed_wednesday(&fx, 1);
        let task = fx.service.materialize_day(1, d("2025-12-03")).await.unwrap()[0].clone();

        let updated = fx
            .service
            .update_task(
                1,
                task.id,
                UpdateTaskDto {
                    completed: Some(true),
                    start_time: Some(Some("07:45".to_string())),
                    remarks: Some(Some("  RAS ".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.start_time.as_deref(), Some("07:45"));
        assert_eq!(updated.remarks.as_deref(), Some("RAS"));

        let bad_time = fx
            .service
            .update_task(
                1,
                task.id,
                UpdateTaskDto {
                    end_time: Some(Some("7h".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(bad_time, AppError::Validation(_)));

        let other_lot = fx
            .service
            .update_task(2, task.id, UpdateTaskDto::default())
            .await
            .unwrap_err();
        assert!(matches!(other_lot, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_validate_day_snapshots_and_resets() {
        let fx = fixture();
        seed_wednesday(&fx, 5);
        let date = d("2025-12-03");

        let tasks = fx.service.materialize_day(1, date).await.unwrap();
        for task in tasks.iter().take(3) {
            fx.service
                .update_task(
                    1,
                    task.id,
                    UpdateTaskDto {
                        completed: Some(true),
                        end_time: Some(Some("16:00".to_string())),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }
        fx.damages.add_archivable(1, date, "Fuite");

        let summary = fx.service.validate_day(1, date).await.unwrap();
        assert_eq!(
            summary,
            DayValidationSummary {
                total_tasks: 5,
                completed_tasks: 3,
                archived_damage_reports: 1,
            }
        );

        let history = fx
            .service
            .list_history(Some(1), DateRange::single(date))
            .await
            .unwrap();
        assert_eq!(history.len(), 5);
        assert_eq!(history.iter().filter(|h| h.completed).count(), 3);
        assert!(history
            .iter()
            .all(|h| tasks.iter().any(|t| Some(t.id) == h.original_task_id)));

        let live = fx.service.materialize_day(1, date).await.unwrap();
        assert_eq!(live.len(), 5);
        assert!(live
            .iter()
            .all(|t| !t.completed && t.end_time.is_none() && t.remarks.is_none()));
        assert_eq!(fx.damages.live_count(), 0);
        assert_eq!(fx.damages.history_rows().len(), 1);
    }

    #[tokio::test]
    async fn test_validate_day_retry_does_not_duplicate_history() {
        let fx = fixture();
        seed_wednesday(&fx, 2);
        let date = d("2025-12-03");
        fx.service.materialize_day(1, date).await.unwrap();

        fx.service.validate_day(1, date).await.unwrap();
        fx.service.validate_day(1, date).await.unwrap();

        let history = fx
            .service
            .list_history(Some(1), DateRange::single(date))
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_lost_race_still_inserts_remaining_tasks() {
        let fx = fixture();
        seed_wednesday(&fx, 3);
        let date = d("2025-12-03");
        // Another viewer writes the second task between our read and our inserts
        fx.tasks.race_next_insert(NewTaskInstance {
            company_id: 1,
            task_name: "Tâche 2".to_string(),
            day_of_week: "mercredi".to_string(),
            week_number: 1,
            execution_date: date,
        });

        let tasks = fx.service.materialize_day(1, date).await.unwrap();
        let names: Vec<&str> = tasks.iter().map(|t| t.task_name.as_str()).collect();
        assert_eq!(names, vec!["Tâche 1", "Tâche 2", "Tâche 3"]);
        assert_eq!(fx.tasks.instance_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_no_partial_day() {
        let fx = fixture();
        seed_wednesday(&fx, 3);
        let date = d("2025-12-03");
        fx.tasks.fail_next_insert_of("Tâche 2");

        let err = fx.service.materialize_day(1, date).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(fx.tasks.instance_count(), 0);

        let retried = fx.service.materialize_day(1, date).await.unwrap();
        assert_eq!(retried.len(), 3);
    }
}
