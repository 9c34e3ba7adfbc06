#![allow(dead_code)]

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use hrms_lite::api::attendance::MarkAttendance;
use hrms_lite::api::employee::CreateEmployee;
use hrms_lite::db;
use hrms_lite::model::attendance::{AttendanceStatus, AttendanceWithEmployee};
use hrms_lite::model::employee::Employee;
use hrms_lite::service::attendance_service::AttendanceService;
use hrms_lite::service::employee_service::EmployeeService;

/// Fresh in-memory database with the schema installed. One connection only:
/// every sqlite `:memory:` connection is its own database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    db::init_schema(&pool).await.unwrap();
    pool
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn employee_request(code: &str, email: &str, department: &str) -> CreateEmployee {
    CreateEmployee {
        employee_code: code.to_string(),
        name: format!("Employee {code}"),
        email: email.to_string(),
        department: department.to_string(),
        designation: None,
        date_of_joining: days_ago(365),
        phone: None,
    }
}

pub async fn seed_employee(
    pool: &SqlitePool,
    code: &str,
    email: &str,
    department: &str,
) -> Employee {
    EmployeeService::new(pool.clone())
        .create_employee(employee_request(code, email, department))
        .await
        .unwrap()
}

pub async fn seed_attendance(
    pool: &SqlitePool,
    employee_id: &str,
    date: NaiveDate,
    status: AttendanceStatus,
) -> AttendanceWithEmployee {
    AttendanceService::new(pool.clone())
        .mark_attendance(MarkAttendance {
            employee_id: employee_id.to_string(),
            date,
            status,
            check_in: None,
            check_out: None,
            notes: None,
        })
        .await
        .unwrap()
}
