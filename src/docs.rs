use crate::api::PaginationMeta;
use crate::api::attendance::{
    AttendanceListResponse, AttendanceQuery, MarkAttendance, UpdateAttendance,
};
use crate::api::dashboard::{DashboardQuery, DashboardSummaryResponse, DateRange};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery, UpdateEmployee};
use crate::model::attendance::{Attendance, AttendanceStatus, AttendanceWithEmployee};
use crate::model::employee::Employee;
use crate::repository::dashboard_repo::{DepartmentBreakdown, StatusSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

Backend for employee management and attendance tracking.

### Key Features
- **Employee Management**
  - Create, update, list, search and delete employee profiles
- **Attendance Management**
  - Mark daily attendance, list with filters, update and delete records
- **Dashboard**
  - Aggregated attendance summary with per-department breakdown

### Response Format
- JSON-based RESTful responses
- Pagination metadata on list endpoints
- Errors carry `error_code`, `message` and optional `details`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,

        crate::api::dashboard::get_summary
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            Attendance,
            AttendanceStatus,
            AttendanceWithEmployee,
            MarkAttendance,
            UpdateAttendance,
            AttendanceQuery,
            AttendanceListResponse,
            DashboardQuery,
            DashboardSummaryResponse,
            DateRange,
            StatusSummary,
            DepartmentBreakdown,
            PaginationMeta
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Attendance summary APIs"),
        (name = "Health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;
