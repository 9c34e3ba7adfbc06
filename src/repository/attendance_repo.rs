use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::model::attendance::{Attendance, AttendanceWithEmployee};
use crate::repository::Paginated;

#[derive(Debug, Default)]
pub struct AttendanceListFilter {
    pub page: u32,
    pub per_page: u32,
    pub employee_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<String>,
    pub department: Option<String>,
}

enum FilterValue {
    Str(String),
    Date(NaiveDate),
}

const JOINED_COLUMNS: &str = r#"
    a.id, a.employee_id, e.name AS employee_name, e.employee_code,
    a.date, a.status, a.check_in, a.check_out, a.notes,
    a.created_at, a.updated_at
"#;

/// Encapsulates all attendance-related queries. Every read that reaches the
/// caller carries the owning employee via a single JOIN, never a per-row
/// lookup.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

impl AttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, attendance: Attendance) -> Result<Attendance, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO attendance
                (id, employee_id, date, status, check_in, check_out, notes,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&attendance.id)
        .bind(&attendance.employee_id)
        .bind(attendance.date)
        .bind(&attendance.status)
        .bind(attendance.check_in)
        .bind(attendance.check_out)
        .bind(&attendance.notes)
        .bind(attendance.created_at)
        .bind(attendance.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(attendance)
    }

    pub async fn get_by_id(
        &self,
        id: &str,
    ) -> Result<Option<AttendanceWithEmployee>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM attendance a
            INNER JOIN employee e ON e.id = a.employee_id
            WHERE a.id = ?
            "#
        );
        sqlx::query_as::<_, AttendanceWithEmployee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Existence probe on the (employee_id, date) unique pair.
    pub async fn get_by_employee_and_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE employee_id = ? AND date = ?",
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
    }

    /// Paginated listing ordered by date descending, insertion recency
    /// breaking ties. The JOIN to employee is part of both the data and the
    /// count query, so the department filter sees identical row sets.
    pub async fn list(
        &self,
        filter: &AttendanceListFilter,
    ) -> Result<Paginated<AttendanceWithEmployee>, sqlx::Error> {
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<FilterValue> = Vec::new();

        if let Some(employee_id) = &filter.employee_id {
            where_sql.push_str(" AND a.employee_id = ?");
            args.push(FilterValue::Str(employee_id.clone()));
        }

        if let Some(date) = filter.date {
            where_sql.push_str(" AND a.date = ?");
            args.push(FilterValue::Date(date));
        }

        if let Some(date_from) = filter.date_from {
            where_sql.push_str(" AND a.date >= ?");
            args.push(FilterValue::Date(date_from));
        }

        if let Some(date_to) = filter.date_to {
            where_sql.push_str(" AND a.date <= ?");
            args.push(FilterValue::Date(date_to));
        }

        if let Some(status) = &filter.status {
            where_sql.push_str(" AND a.status = ?");
            args.push(FilterValue::Str(status.clone()));
        }

        if let Some(department) = &filter.department {
            where_sql.push_str(" AND e.department = ?");
            args.push(FilterValue::Str(department.clone()));
        }

        let from_sql = " FROM attendance a INNER JOIN employee e ON e.id = a.employee_id";

        let count_sql = format!("SELECT COUNT(*){from_sql}{where_sql}");
        debug!(sql = %count_sql, "Counting attendance records");

        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &args {
            count_q = match arg {
                FilterValue::Str(v) => count_q.bind(v),
                FilterValue::Date(v) => count_q.bind(*v),
            };
        }
        let total = count_q.fetch_one(&self.pool).await?;

        let data_sql = format!(
            "SELECT {JOINED_COLUMNS}{from_sql}{where_sql} \
             ORDER BY a.date DESC, a.created_at DESC LIMIT ? OFFSET ?"
        );
        debug!(sql = %data_sql, page = filter.page, per_page = filter.per_page, "Fetching attendance records");

        // Widened before the multiply; page is caller-supplied and unbounded.
        let offset = (filter.page as i64 - 1) * filter.per_page as i64;
        let mut data_q = sqlx::query_as::<_, AttendanceWithEmployee>(&data_sql);
        for arg in &args {
            data_q = match arg {
                FilterValue::Str(v) => data_q.bind(v),
                FilterValue::Date(v) => data_q.bind(*v),
            };
        }
        let items = data_q
            .bind(filter.per_page as i64)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Paginated {
            items,
            total,
            page: filter.page,
            per_page: filter.per_page,
        })
    }

    /// Persist mutated fields. employee_id and date are immutable and never
    /// appear in the SET clause.
    pub async fn update(&self, attendance: &Attendance) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE attendance
            SET status = ?, check_in = ?, check_out = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&attendance.status)
        .bind(attendance.check_in)
        .bind(attendance.check_out)
        .bind(&attendance.notes)
        .bind(attendance.updated_at)
        .bind(&attendance.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
