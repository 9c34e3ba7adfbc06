use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::repository::dashboard_repo::{DepartmentBreakdown, StatusSummary};
use crate::service::dashboard_service::DashboardService;

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DashboardQuery {
    /// Range start, defaults to today
    #[schema(format = "date", value_type = String)]
    pub date_from: Option<NaiveDate>,
    /// Range end, defaults to date_from
    #[schema(format = "date", value_type = String)]
    pub date_to: Option<NaiveDate>,
    /// Restrict to one department
    pub department: Option<String>,
    /// Include inactive employees in every count (excluded by default)
    pub include_inactive: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct DateRange {
    #[schema(example = "2024-06-01", format = "date", value_type = String)]
    pub date_from: NaiveDate,
    #[schema(example = "2024-06-07", format = "date", value_type = String)]
    pub date_to: NaiveDate,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardSummaryResponse {
    pub date_range: DateRange,
    #[schema(example = 42)]
    pub total_employees: i64,
    pub summary: StatusSummary,
    #[schema(example = 87.5)]
    pub attendance_rate: f64,
    pub department_breakdown: Vec<DepartmentBreakdown>,
}

/// Aggregated attendance summary
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Attendance counts, rate and department breakdown", body = DashboardSummaryResponse)
    ),
    tag = "Dashboard"
)]
pub async fn get_summary(
    pool: web::Data<SqlitePool>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let service = DashboardService::new(pool.get_ref().clone());
    let summary = service.get_summary(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}
