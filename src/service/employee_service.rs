use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::api::employee::{CreateEmployee, EmployeeQuery, UpdateEmployee};
use crate::error::{AppError, AppResult};
use crate::model::employee::Employee;
use crate::repository::Paginated;
use crate::repository::employee_repo::{EmployeeListFilter, EmployeeRepository};
use crate::service::MAX_PER_PAGE;

/// Employee business logic.
///
/// Normalizes identifying fields, maps store-level uniqueness violations to
/// domain conflict kinds (the raw constraint error never reaches callers),
/// and audit-logs destructive operations.
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: EmployeeRepository::new(pool),
        }
    }

    /// Create a new employee. Email is lowercased, employee_code uppercased;
    /// uniqueness of both is enforced by the store's indexes and translated
    /// here into EMPLOYEE_EMAIL_EXISTS / EMPLOYEE_CODE_EXISTS conflicts.
    pub async fn create_employee(&self, data: CreateEmployee) -> AppResult<Employee> {
        let email = normalize_email(&data.email)?;
        let employee_code = data.employee_code.trim().to_uppercase();
        let now = Utc::now();

        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            employee_code: employee_code.clone(),
            name: data.name,
            email: email.clone(),
            department: data.department,
            designation: data.designation,
            date_of_joining: data.date_of_joining,
            phone: data.phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .create(employee)
            .await
            .map_err(|err| map_employee_conflict(err, &email, Some(&employee_code)))
    }

    pub async fn get_employee(&self, id: &str) -> AppResult<Employee> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(
                "EMPLOYEE_NOT_FOUND",
                "Employee not found",
                Some(json!({ "employee_id": id })),
            )
        })
    }

    /// Paginated listing. per_page is capped regardless of what the caller
    /// asks for.
    pub async fn list_employees(&self, query: EmployeeQuery) -> AppResult<Paginated<Employee>> {
        let filter = EmployeeListFilter {
            page: query.page.unwrap_or(1).max(1),
            per_page: query.per_page.unwrap_or(20).clamp(1, MAX_PER_PAGE),
            department: query.department,
            is_active: query.is_active,
            search: query.search,
        };
        Ok(self.repo.list(&filter).await?)
    }

    /// Partial update: only supplied fields change. employee_code is
    /// immutable and structurally absent from the update schema.
    pub async fn update_employee(&self, id: &str, data: UpdateEmployee) -> AppResult<Employee> {
        let mut employee = self.get_employee(id).await?;

        if let Some(name) = data.name {
            employee.name = name;
        }
        if let Some(email) = &data.email {
            employee.email = normalize_email(email)?;
        }
        if let Some(department) = data.department {
            employee.department = department;
        }
        if let Some(designation) = data.designation {
            employee.designation = Some(designation);
        }
        if let Some(date_of_joining) = data.date_of_joining {
            employee.date_of_joining = date_of_joining;
        }
        if let Some(phone) = data.phone {
            employee.phone = Some(phone);
        }
        if let Some(is_active) = data.is_active {
            employee.is_active = is_active;
        }
        employee.updated_at = Utc::now();

        let email = employee.email.clone();
        self.repo
            .update(employee)
            .await
            .map_err(|err| map_employee_conflict(err, &email, None))
    }

    /// Irreversible delete; the store cascades to all attendance records of
    /// this employee. The audit record is emitted before the delete so the
    /// trail survives even if the delete itself fails.
    pub async fn delete_employee(&self, id: &str) -> AppResult<()> {
        let employee = self.get_employee(id).await?;

        warn!(
            action = "DELETE",
            entity = "employee",
            entity_id = %employee.id,
            employee_code = %employee.employee_code,
            name = %employee.name,
            email = %employee.email,
            department = %employee.department,
            "AUDIT: deleting employee (cascades to attendance)"
        );

        self.repo.delete(&employee.id).await?;
        Ok(())
    }
}

/// Trim + lowercase, then require '@' with a '.' somewhere after it.
fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .map_or(false, |(_, domain)| domain.contains('.'));
    if !valid {
        return Err(AppError::validation(
            "INVALID_EMAIL",
            "Invalid email format",
            Some(json!({ "email": raw })),
        ));
    }
    Ok(email)
}

/// Translate a uniqueness violation into the conflict kind for whichever
/// constraint fired. Anything that is not a unique violation propagates as
/// Internal.
fn map_employee_conflict(err: sqlx::Error, email: &str, employee_code: Option<&str>) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.message();
            if constraint.contains("employee.email") {
                return AppError::conflict(
                    "EMPLOYEE_EMAIL_EXISTS",
                    "An employee with this email already exists",
                    Some(json!({ "email": email })),
                );
            }
            if constraint.contains("employee.employee_code") {
                return AppError::conflict(
                    "EMPLOYEE_CODE_EXISTS",
                    "An employee with this code already exists",
                    Some(json!({ "employee_code": employee_code })),
                );
            }
            return AppError::conflict(
                "EMPLOYEE_CONFLICT",
                "Employee data conflicts with existing records",
                None,
            );
        }
    }
    AppError::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  John.Doe@Company.COM ").unwrap(),
            "john.doe@company.com"
        );
    }

    #[test]
    fn email_requires_at_and_dotted_domain() {
        assert!(normalize_email("john.doe").is_err());
        assert!(normalize_email("john@localhost").is_err());
        assert!(normalize_email("john@company.com").is_ok());
        // Only the '@' and a dotted domain are checked
        assert!(normalize_email("@company.com").is_ok());
    }

    #[test]
    fn invalid_email_is_a_validation_error() {
        let err = normalize_email("not-an-email").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_EMAIL");
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
