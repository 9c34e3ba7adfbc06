use chrono::Local;
use sqlx::SqlitePool;

use crate::api::dashboard::{DashboardQuery, DashboardSummaryResponse, DateRange};
use crate::error::AppResult;
use crate::repository::dashboard_repo::DashboardRepository;

/// Dashboard orchestration: fills in date-range defaults and reshapes the
/// raw aggregate. No business rules of its own beyond default-filling.
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: DashboardRepository::new(pool),
        }
    }

    /// date_from defaults to today, date_to to date_from.
    pub async fn get_summary(&self, query: DashboardQuery) -> AppResult<DashboardSummaryResponse> {
        let date_from = query.date_from.unwrap_or_else(|| Local::now().date_naive());
        let date_to = query.date_to.unwrap_or(date_from);
        let include_inactive = query.include_inactive.unwrap_or(false);

        let aggregate = self
            .repo
            .compute_summary(
                date_from,
                date_to,
                query.department.as_deref(),
                include_inactive,
            )
            .await?;

        Ok(DashboardSummaryResponse {
            date_range: DateRange { date_from, date_to },
            total_employees: aggregate.total_employees,
            summary: aggregate.summary,
            attendance_rate: aggregate.attendance_rate,
            department_breakdown: aggregate.department_breakdown,
        })
    }
}
