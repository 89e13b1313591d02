use std::sync::Arc;

use crate::core::error::Result;
use crate::features::companies::CompanyService;
use crate::features::damage_reports::DamageReportService;
use crate::features::dashboard::dtos::{
    CompanyDetailDto, CompanyOverview, DamageRow, OverviewDto, OverviewMode, TaskRow,
};
use crate::features::tasks::TaskService;
use crate::shared::types::DateRange;

/// Rounded percentage, 0 when there is nothing to complete
fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 * 100.0 / total as f64).round() as u32
}

fn summarize(
    company_id: i64,
    company_name: String,
    mode: OverviewMode,
    tasks: &[TaskRow],
    damage_reports: usize,
) -> CompanyOverview {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();
    CompanyOverview {
        company_id,
        company_name,
        total_tasks,
        completed_tasks,
        completion_rate: completion_rate(completed_tasks, total_tasks),
        tasks_missing: match mode {
            OverviewMode::History => total_tasks - completed_tasks,
            OverviewMode::Current => 0,
        },
        damage_reports,
    }
}

/// Admin overview across every lot, read through the feature services
pub struct DashboardService {
    companies: Arc<CompanyService>,
    tasks: Arc<TaskService>,
    damage_reports: Arc<DamageReportService>,
}

impl DashboardService {
    pub fn new(
        companies: Arc<CompanyService>,
        tasks: Arc<TaskService>,
        damage_reports: Arc<DamageReportService>,
    ) -> Self {
        Self {
            companies,
            tasks,
            damage_reports,
        }
    }

    /// Task and damage rows for one lot, or every lot when `company_id` is `None`
    async fn rows(
        &self,
        company_id: Option<i64>,
        mode: OverviewMode,
        range: DateRange,
    ) -> Result<(Vec<(i64, TaskRow)>, Vec<(i64, DamageRow)>)> {
        match mode {
            OverviewMode::Current => {
                let (tasks, damage) = tokio::try_join!(
                    self.tasks.list_instances(company_id, range),
                    self.damage_reports.list_pending_archive(company_id, range)
                )?;
                Ok((
                    tasks.into_iter().map(|t| (t.company_id, t.into())).collect(),
                    damage.into_iter().map(|d| (d.company_id, d.into())).collect(),
                ))
            }
            OverviewMode::History => {
                let (tasks, damage) = tokio::try_join!(
                    self.tasks.list_history(company_id, range),
                    self.damage_reports.list_history(company_id, range)
                )?;
                Ok((
                    tasks.into_iter().map(|t| (t.company_id, t.into())).collect(),
                    damage.into_iter().map(|d| (d.company_id, d.into())).collect(),
                ))
            }
        }
    }

    pub async fn overview(&self, mode: OverviewMode, range: DateRange) -> Result<OverviewDto> {
        let companies = self.companies.list().await?;
        let (tasks, damage) = self.rows(None, mode, range).await?;

        let companies = companies
            .into_iter()
            .map(|company| {
                let company_tasks: Vec<TaskRow> = tasks
                    .iter()
                    .filter(|(id, _)| *id == company.id)
                    .map(|(_, task)| task.clone())
                    .collect();
                let damage_count = damage.iter().filter(|(id, _)| *id == company.id).count();
                summarize(company.id, company.name, mode, &company_tasks, damage_count)
            })
            .collect();

        tracing::debug!(
            "Overview computed: mode={:?}, from={}, to={}",
            mode,
            range.from,
            range.to
        );

        Ok(OverviewDto {
            mode,
            from: range.from,
            to: range.to,
            companies,
        })
    }

    pub async fn company_detail(
        &self,
        company_id: i64,
        mode: OverviewMode,
        range: DateRange,
    ) -> Result<CompanyDetailDto> {
        let company = self.companies.get(company_id).await?;
        let (tasks, damage) = self.rows(Some(company_id), mode, range).await?;

        let mut tasks: Vec<TaskRow> = tasks.into_iter().map(|(_, task)| task).collect();
        tasks.sort_by(|a, b| {
            a.execution_date
                .cmp(&b.execution_date)
                .then_with(|| a.task_name.cmp(&b.task_name))
        });
        let damage_reports: Vec<DamageRow> = damage.into_iter().map(|(_, row)| row).collect();

        Ok(CompanyDetailDto {
            mode,
            from: range.from,
            to: range.to,
            summary: summarize(company.id, company.name, mode, &tasks, damage_reports.len()),
            tasks,
            damage_reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::core::error::AppError;
    use crate::features::companies::repositories::MemoryCompanyRepository;
    use crate::features::damage_reports::repositories::MemoryDamageReportRepository;
    use crate::features::tasks::dtos::UpdateTaskDto;
    use crate::features::tasks::repositories::MemoryTaskRepository;
    use crate::features::tasks::RotationCalculator;
    use crate::modules::storage::MemoryObjectStore;
    use crate::shared::security::PasswordHasher;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        tasks: Arc<TaskService>,
        task_repo: Arc<MemoryTaskRepository>,
        damage_repo: Arc<MemoryDamageReportRepository>,
        service: DashboardService,
    }

    fn fixture() -> Fixture {
        let companies = Arc::new(CompanyService::new(
            Arc::new(MemoryCompanyRepository::seeded()),
            PasswordHasher::new(4),
        ));
        let damage_repo = Arc::new(MemoryDamageReportRepository::new());
        let damage_reports = Arc::new(DamageReportService::new(
            damage_repo.clone(),
            Arc::new(MemoryObjectStore::new()),
        ));
        let task_repo = Arc::new(MemoryTaskRepository::new());
        let tasks = Arc::new(TaskService::new(
            task_repo.clone(),
            damage_reports.clone(),
            RotationCalculator::new(d("2025-12-01")),
        ));
        let service = DashboardService::new(companies, tasks.clone(), damage_reports);
        Fixture {
            tasks,
            task_repo,
            damage_repo,
            service,
        }
    }

    /// Lot 1 gets three Wednesday tasks with two completed, lot 3 one damage report
    async fn seed_wednesday(fx: &Fixture, date: NaiveDate) {
        for name in ["Tirage câbles", "Pose prises", "Repérage"] {
            fx.task_repo.add_template(1, 1, "mercredi", name);
        }
        let tasks = fx.tasks.materialize_day(1, date).await.unwrap();
        for task in tasks.iter().take(2) {
            fx.tasks
                .update_task(
                    1,
                    task.id,
                    UpdateTaskDto {
                        completed: Some(true),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }
        fx.damage_repo.add_archivable(3, date, "Canalisation percée");
    }

    #[test]
    fn test_completion_rate_rounds() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(1, 8), 13);
        assert_eq!(completion_rate(4, 4), 100);
    }

    #[tokio::test]
    async fn test_current_overview_counts_live_rows() {
        let fx = fixture();
        let date = d("2025-12-03");
        seed_wednesday(&fx, date).await;

        let overview = fx
            .service
            .overview(OverviewMode::Current, DateRange::single(date))
            .await
            .unwrap();
        assert_eq!(overview.companies.len(), 8);

        let electricite = &overview.companies[0];
        assert_eq!(electricite.company_name, "LOT ELECTRICITE");
        assert_eq!(electricite.total_tasks, 3);
        assert_eq!(electricite.completed_tasks, 2);
        assert_eq!(electricite.completion_rate, 67);
        assert_eq!(electricite.tasks_missing, 0);
        assert_eq!(electricite.damage_reports, 0);

        let plomberie = &overview.companies[2];
        assert_eq!(plomberie.total_tasks, 0);
        assert_eq!(plomberie.completion_rate, 0);
        assert_eq!(plomberie.damage_reports, 1);
    }

    #[tokio::test]
    async fn test_history_overview_after_validation() {
        let fx = fixture();
        let date = d("2025-12-03");
        seed_wednesday(&fx, date).await;
        fx.tasks.validate_day(1, date).await.unwrap();
        fx.tasks.validate_day(3, date).await.unwrap();

        let history = fx
            .service
            .overview(OverviewMode::History, DateRange::single(date))
            .await
            .unwrap();
        let electricite = &history.companies[0];
        assert_eq!(electricite.total_tasks, 3);
        assert_eq!(electricite.completed_tasks, 2);
        assert_eq!(electricite.tasks_missing, 1);
        assert_eq!(history.companies[2].damage_reports, 1);

        // Validation reset the live rows and swept the damage report
        let current = fx
            .service
            .overview(OverviewMode::Current, DateRange::single(date))
            .await
            .unwrap();
        assert_eq!(current.companies[0].completed_tasks, 0);
        assert_eq!(current.companies[2].damage_reports, 0);
    }

    #[tokio::test]
    async fn test_company_detail_lists_rows() {
        let fx = fixture();
        let date = d("2025-12-03");
        seed_wednesday(&fx, date).await;

        let detail = fx
            .service
            .company_detail(1, OverviewMode::Current, DateRange::single(date))
            .await
            .unwrap();
        assert_eq!(detail.summary.total_tasks, 3);
        let names: Vec<_> = detail.tasks.iter().map(|t| t.task_name.as_str()).collect();
        assert_eq!(names, ["Pose prises", "Repérage", "Tirage câbles"]);
        assert!(detail.damage_reports.is_empty());

        let missing = fx
            .service
            .company_detail(99, OverviewMode::Current, DateRange::single(date))
            .await
            .unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));
    }
}
