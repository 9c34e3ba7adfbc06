use sqlx::SqlitePool;
use tracing::debug;

use crate::model::employee::Employee;
use crate::repository::Paginated;

/// Filters for the employee listing. `page`/`per_page` arrive already
/// normalized by the service layer.
#[derive(Debug, Default)]
pub struct EmployeeListFilter {
    pub page: u32,
    pub per_page: u32,
    pub department: Option<String>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

// Typed SQLx binding for dynamically built WHERE clauses.
enum FilterValue {
    Str(String),
    Bool(bool),
}

/// Encapsulates all employee-related queries. Stateless wrapper around the
/// pool; invariant enforcement lives one layer up in the service.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, employee: Employee) -> Result<Employee, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO employee
                (id, employee_code, name, email, department, designation,
                 date_of_joining, phone, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.employee_code)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.designation)
        .bind(employee.date_of_joining)
        .bind(&employee.phone)
        .bind(employee.is_active)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employee WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employee WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employee WHERE employee_code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
    }

    /// Paginated listing, newest first. The count query reuses the exact
    /// WHERE clause and bindings of the data query.
    pub async fn list(
        &self,
        filter: &EmployeeListFilter,
    ) -> Result<Paginated<Employee>, sqlx::Error> {
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<FilterValue> = Vec::new();

        if let Some(department) = &filter.department {
            where_sql.push_str(" AND department = ?");
            args.push(FilterValue::Str(department.clone()));
        }

        if let Some(is_active) = filter.is_active {
            where_sql.push_str(" AND is_active = ?");
            args.push(FilterValue::Bool(is_active));
        }

        if let Some(search) = &filter.search {
            where_sql.push_str(
                " AND (LOWER(name) LIKE ? OR LOWER(email) LIKE ? OR LOWER(employee_code) LIKE ?)",
            );
            let like = format!("%{}%", search.to_lowercase());
            args.push(FilterValue::Str(like.clone()));
            args.push(FilterValue::Str(like.clone()));
            args.push(FilterValue::Str(like));
        }

        let count_sql = format!("SELECT COUNT(*) FROM employee{}", where_sql);
        debug!(sql = %count_sql, "Counting employees");

        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &args {
            count_q = match arg {
                FilterValue::Str(v) => count_q.bind(v),
                FilterValue::Bool(v) => count_q.bind(*v),
            };
        }
        let total = count_q.fetch_one(&self.pool).await?;

        let data_sql = format!(
            "SELECT * FROM employee{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            where_sql
        );
        debug!(sql = %data_sql, page = filter.page, per_page = filter.per_page, "Fetching employees");

        // Widened before the multiply; page is caller-supplied and unbounded.
        let offset = (filter.page as i64 - 1) * filter.per_page as i64;
        let mut data_q = sqlx::query_as::<_, Employee>(&data_sql);
        for arg in &args {
            data_q = match arg {
                FilterValue::Str(v) => data_q.bind(v),
                FilterValue::Bool(v) => data_q.bind(*v),
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

    /// Persist the mutated entity. employee_code stays out of the SET list;
    /// it is immutable after creation.
    pub async fn update(&self, employee: Employee) -> Result<Employee, sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE employee
            SET name = ?, email = ?, department = ?, designation = ?,
                date_of_joining = ?, phone = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.designation)
        .bind(employee.date_of_joining)
        .bind(&employee.phone)
        .bind(employee.is_active)
        .bind(employee.updated_at)
        .bind(&employee.id)
        .execute(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Hard delete. The store cascades to attendance via the FK.
    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employee WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_active(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await
    }
}
