use chrono::{Local, NaiveTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::api::attendance::{AttendanceQuery, MarkAttendance, UpdateAttendance};
use crate::error::{AppError, AppResult};
use crate::model::attendance::{Attendance, AttendanceWithEmployee};
use crate::repository::Paginated;
use crate::repository::attendance_repo::{AttendanceListFilter, AttendanceRepository};
use crate::repository::employee_repo::EmployeeRepository;
use crate::service::MAX_PER_PAGE;

/// Attendance business logic.
///
/// Enforces the temporal rules (no future dates, nothing before the
/// employee's joining date), pre-resolves the employee so a bad reference
/// surfaces as a friendly 404, and translates the (employee_id, date)
/// uniqueness violation into ATTENDANCE_DUPLICATE. The unique index remains
/// the race-safe enforcement; the pre-checks exist for the error message.
pub struct AttendanceService {
    attendance_repo: AttendanceRepository,
    employee_repo: EmployeeRepository,
}

impl AttendanceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            attendance_repo: AttendanceRepository::new(pool.clone()),
            employee_repo: EmployeeRepository::new(pool),
        }
    }

    /// Mark attendance for one employee on one date. The check order is
    /// fixed: employee existence, future date, pre-joining date, then the
    /// insert. A second write for the same (employee, date) is always
    /// rejected, never upserted.
    pub async fn mark_attendance(&self, data: MarkAttendance) -> AppResult<AttendanceWithEmployee> {
        let employee = self
            .employee_repo
            .get_by_id(&data.employee_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "EMPLOYEE_NOT_FOUND",
                    "Employee not found",
                    Some(json!({ "employee_id": data.employee_id })),
                )
            })?;

        let today = Local::now().date_naive();
        if data.date > today {
            return Err(AppError::validation(
                "FUTURE_DATE",
                "Attendance date cannot be in the future",
                Some(json!({ "date": data.date, "today": today })),
            ));
        }

        if data.date < employee.date_of_joining {
            return Err(AppError::validation(
                "ATTENDANCE_BEFORE_JOINING",
                "Attendance date cannot be before the employee's joining date",
                Some(json!({
                    "date": data.date,
                    "date_of_joining": employee.date_of_joining,
                })),
            ));
        }

        validate_time_range(data.check_in, data.check_out)?;

        let now = Utc::now();
        let attendance = Attendance {
            id: Uuid::new_v4().to_string(),
            employee_id: data.employee_id.clone(),
            date: data.date,
            status: data.status.to_string(),
            check_in: data.check_in,
            check_out: data.check_out,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        };

        let attendance = self
            .attendance_repo
            .create(attendance)
            .await
            .map_err(|err| map_attendance_conflict(err, &data.employee_id, data.date))?;

        self.get_attendance(&attendance.id).await
    }

    pub async fn get_attendance(&self, id: &str) -> AppResult<AttendanceWithEmployee> {
        self.attendance_repo.get_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(
                "ATTENDANCE_NOT_FOUND",
                "Attendance record not found",
                Some(json!({ "attendance_id": id })),
            )
        })
    }

    pub async fn list_attendance(
        &self,
        query: AttendanceQuery,
    ) -> AppResult<Paginated<AttendanceWithEmployee>> {
        let filter = AttendanceListFilter {
            page: query.page.unwrap_or(1).max(1),
            per_page: query.per_page.unwrap_or(20).clamp(1, MAX_PER_PAGE),
            employee_id: query.employee_id,
            date: query.date,
            date_from: query.date_from,
            date_to: query.date_to,
            status: query.status,
            department: query.department,
        };
        Ok(self.attendance_repo.list(&filter).await?)
    }

    /// Partial update of status / check_in / check_out / notes. employee_id
    /// and date are structurally absent from the update schema, so the
    /// temporal invariants established at creation are not re-checked.
    pub async fn update_attendance(
        &self,
        id: &str,
        data: UpdateAttendance,
    ) -> AppResult<AttendanceWithEmployee> {
        let existing = self.get_attendance(id).await?;
        let mut record = existing.record();

        if let Some(status) = data.status {
            record.status = status.to_string();
        }
        if let Some(check_in) = data.check_in {
            record.check_in = Some(check_in);
        }
        if let Some(check_out) = data.check_out {
            record.check_out = Some(check_out);
        }
        if let Some(notes) = data.notes {
            record.notes = Some(notes);
        }

        validate_time_range(record.check_in, record.check_out)?;

        record.updated_at = Utc::now();
        self.attendance_repo.update(&record).await?;

        self.get_attendance(id).await
    }

    /// Irreversible delete, audit-logged before the row is removed.
    pub async fn delete_attendance(&self, id: &str) -> AppResult<()> {
        let attendance = self.get_attendance(id).await?;

        warn!(
            action = "DELETE",
            entity = "attendance",
            entity_id = %attendance.id,
            employee_id = %attendance.employee_id,
            date = %attendance.date,
            status = %attendance.status,
            "AUDIT: deleting attendance record"
        );

        self.attendance_repo.delete(&attendance.id).await?;
        Ok(())
    }
}

/// When both times are present, check_out must be strictly after check_in.
fn validate_time_range(check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> AppResult<()> {
    if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
        if check_out <= check_in {
            return Err(AppError::validation(
                "CHECK_OUT_BEFORE_CHECK_IN",
                "check_out must be after check_in",
                Some(json!({ "check_in": check_in, "check_out": check_out })),
            ));
        }
    }
    Ok(())
}

/// Translate insert failures: the (employee_id, date) unique violation
/// becomes ATTENDANCE_DUPLICATE; a foreign-key violation (the employee was
/// deleted between the pre-check and the insert) becomes the same friendly
/// EMPLOYEE_NOT_FOUND the pre-check produces.
fn map_attendance_conflict(
    err: sqlx::Error,
    employee_id: &str,
    date: chrono::NaiveDate,
) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::conflict(
                "ATTENDANCE_DUPLICATE",
                "Attendance already recorded for this date",
                Some(json!({ "employee_id": employee_id, "date": date })),
            );
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(
                "EMPLOYEE_NOT_FOUND",
                "Employee not found",
                Some(json!({ "employee_id": employee_id })),
            );
        }
    }
    AppError::from(err)
}
