use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::api::PaginationMeta;
use crate::error::AppError;
use crate::model::attendance::{AttendanceStatus, AttendanceWithEmployee};
use crate::service::attendance_service::AttendanceService;

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "3f7c1a52-8d9b-4f06-9f0e-6a1a2b3c4d5e")]
    pub employee_id: String,
    #[schema(example = "2024-06-03", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "PRESENT")]
    pub status: AttendanceStatus,
    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub check_in: Option<NaiveTime>,
    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub check_out: Option<NaiveTime>,
    #[schema(nullable = true)]
    pub notes: Option<String>,
}

/// Partial update. employee_id and date are immutable and deliberately not
/// part of this schema.
#[derive(Default, Deserialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = "HALF_DAY")]
    pub status: Option<AttendanceStatus>,
    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub check_in: Option<NaiveTime>,
    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub check_out: Option<NaiveTime>,
    #[schema(nullable = true)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    /// Page number, 1-based
    #[schema(example = 1)]
    pub page: Option<u32>,
    /// Items per page, capped at 100
    #[schema(example = 20)]
    pub per_page: Option<u32>,
    /// Filter by employee
    pub employee_id: Option<String>,
    /// Exact date filter
    #[schema(format = "date", value_type = String)]
    pub date: Option<NaiveDate>,
    /// Inclusive range start
    #[schema(format = "date", value_type = String)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive range end
    #[schema(format = "date", value_type = String)]
    pub date_to: Option<NaiveDate>,
    /// Filter by status
    #[schema(example = "PRESENT")]
    pub status: Option<String>,
    /// Filter by the owning employee's department
    pub department: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceWithEmployee>,
    pub meta: PaginationMeta,
}

/// Mark attendance for an employee
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceWithEmployee),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Attendance already recorded for this date"),
        (status = 422, description = "Future date, pre-joining date or invalid time range")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, AppError> {
    let service = AttendanceService::new(pool.get_ref().clone());
    let attendance = service.mark_attendance(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(attendance))
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Paginated attendance list", body = AttendanceListResponse)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, AppError> {
    let service = AttendanceService::new(pool.get_ref().clone());
    let page = service.list_attendance(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        meta: PaginationMeta::new(page.page, page.per_page, page.total),
        data: page.items,
    }))
}

/// Get attendance record by ID
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{attendance_id}",
    params(
        ("attendance_id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record found", body = AttendanceWithEmployee),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = AttendanceService::new(pool.get_ref().clone());
    let attendance = service.get_attendance(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(attendance))
}

/// Update attendance record (employee_id and date are immutable)
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{attendance_id}",
    params(
        ("attendance_id", Path, description = "Attendance record ID")
    ),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance updated", body = AttendanceWithEmployee),
        (status = 404, description = "Attendance record not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<UpdateAttendance>,
) -> Result<HttpResponse, AppError> {
    let service = AttendanceService::new(pool.get_ref().clone());
    let attendance = service
        .update_attendance(&path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(attendance))
}

/// Delete attendance record
#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{attendance_id}",
    params(
        ("attendance_id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 204, description = "Attendance deleted"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = AttendanceService::new(pool.get_ref().clone());
    service.delete_attendance(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
