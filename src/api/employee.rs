use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::api::PaginationMeta;
use crate::error::AppError;
use crate::model::employee::Employee;
use crate::service::employee_service::EmployeeService;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Software Engineer", nullable = true)]
    pub designation: Option<String>,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date_of_joining: NaiveDate,
    #[schema(example = "+8801712345678", nullable = true)]
    pub phone: Option<String>,
}

/// Partial update. employee_code is immutable and deliberately not part of
/// this schema.
#[derive(Default, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    #[schema(format = "email")]
    pub email: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date_of_joining: Option<NaiveDate>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Page number, 1-based
    #[schema(example = 1)]
    pub page: Option<u32>,
    /// Items per page, capped at 100
    #[schema(example = 20)]
    pub per_page: Option<u32>,
    /// Filter by department
    pub department: Option<String>,
    /// Filter by active flag
    pub is_active: Option<bool>,
    /// Case-insensitive substring search over name, email and employee_code
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    pub meta: PaginationMeta,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 409, description = "Email or employee_code already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, AppError> {
    let service = EmployeeService::new(pool.get_ref().clone());
    let employee = service.create_employee(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let service = EmployeeService::new(pool.get_ref().clone());
    let page = service.list_employees(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        meta: PaginationMeta::new(page.page, page.per_page, page.total),
        data: page.items,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = EmployeeService::new(pool.get_ref().clone());
    let employee = service.get_employee(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, AppError> {
    let service = EmployeeService::new(pool.get_ref().clone());
    let employee = service
        .update_employee(&path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee (cascades to attendance)
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = EmployeeService::new(pool.get_ref().clone());
    service.delete_employee(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
