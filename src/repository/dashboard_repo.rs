use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

/// Aggregated counts per attendance status.
#[derive(Debug, Default, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct StatusSummary {
    #[schema(example = 12)]
    pub present: i64,
    #[schema(example = 2)]
    pub absent: i64,
    #[schema(example = 1)]
    pub half_day: i64,
    #[schema(example = 3)]
    pub on_leave: i64,
}

impl StatusSummary {
    pub fn total(&self) -> i64 {
        self.present + self.absent + self.half_day + self.on_leave
    }
}

/// Per-department slice of the same conditional counts.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentBreakdown {
    #[schema(example = "Engineering")]
    pub department: String,
    pub present: i64,
    pub absent: i64,
    pub half_day: i64,
    pub on_leave: i64,
}

/// Raw aggregate produced by `compute_summary`.
#[derive(Debug)]
pub struct DashboardAggregate {
    pub total_employees: i64,
    pub summary: StatusSummary,
    pub attendance_rate: f64,
    pub department_breakdown: Vec<DepartmentBreakdown>,
}

const STATUS_COUNTS: &str = r#"
    COALESCE(SUM(CASE WHEN a.status = 'PRESENT'  THEN 1 ELSE 0 END), 0) AS present,
    COALESCE(SUM(CASE WHEN a.status = 'ABSENT'   THEN 1 ELSE 0 END), 0) AS absent,
    COALESCE(SUM(CASE WHEN a.status = 'HALF_DAY' THEN 1 ELSE 0 END), 0) AS half_day,
    COALESCE(SUM(CASE WHEN a.status = 'ON_LEAVE' THEN 1 ELSE 0 END), 0) AS on_leave
"#;

/// Encapsulates the dashboard aggregation queries. Status counts use
/// conditional aggregation in one pass over the filtered row set, never one
/// query per status.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Compute the attendance summary over [date_from, date_to].
    ///
    /// One employee-filter fragment is shared by the employee count, the
    /// status summary and the department breakdown, so all three components
    /// of the result reflect an identical filter set. Inactive employees are
    /// excluded unless `include_inactive`.
    pub async fn compute_summary(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        department: Option<&str>,
        include_inactive: bool,
    ) -> Result<DashboardAggregate, sqlx::Error> {
        let mut emp_filter = String::new();
        if !include_inactive {
            emp_filter.push_str(" AND e.is_active = 1");
        }
        if department.is_some() {
            emp_filter.push_str(" AND e.department = ?");
        }

        // Total employees under the same filter set
        let emp_count_sql = format!("SELECT COUNT(*) FROM employee e WHERE 1=1{emp_filter}");
        debug!(sql = %emp_count_sql, "Counting employees for dashboard");

        let mut emp_count_q = sqlx::query_scalar::<_, i64>(&emp_count_sql);
        if let Some(department) = department {
            emp_count_q = emp_count_q.bind(department);
        }
        let total_employees = emp_count_q.fetch_one(&self.pool).await?;

        let from_sql = " FROM attendance a INNER JOIN employee e ON e.id = a.employee_id";
        let range_sql = " WHERE a.date BETWEEN ? AND ?";

        // Status summary in a single pass
        let summary_sql = format!("SELECT {STATUS_COUNTS}{from_sql}{range_sql}{emp_filter}");
        debug!(sql = %summary_sql, "Computing attendance summary");

        let mut summary_q =
            sqlx::query_as::<_, StatusSummary>(&summary_sql).bind(date_from).bind(date_to);
        if let Some(department) = department {
            summary_q = summary_q.bind(department);
        }
        let summary = summary_q.fetch_one(&self.pool).await?;

        // Same conditional counts grouped by department
        let dept_sql = format!(
            "SELECT e.department, {STATUS_COUNTS}{from_sql}{range_sql}{emp_filter} \
             GROUP BY e.department ORDER BY e.department"
        );
        debug!(sql = %dept_sql, "Computing department breakdown");

        let mut dept_q =
            sqlx::query_as::<_, DepartmentBreakdown>(&dept_sql).bind(date_from).bind(date_to);
        if let Some(department) = department {
            dept_q = dept_q.bind(department);
        }
        let department_breakdown = dept_q.fetch_all(&self.pool).await?;

        Ok(DashboardAggregate {
            total_employees,
            attendance_rate: attendance_rate(&summary),
            summary,
            department_breakdown,
        })
    }
}

/// (present + 0.5 * half_day) / total * 100, rounded to 2 decimals.
/// Defined as 0.0 over an empty range.
fn attendance_rate(summary: &StatusSummary) -> f64 {
    let total = summary.total();
    if total == 0 {
        return 0.0;
    }
    let rate = (summary.present as f64 + 0.5 * summary.half_day as f64) / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}
