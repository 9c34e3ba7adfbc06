mod common;

use actix_web::rt::time::sleep;
use std::time::Duration;

use common::{days_ago, seed_attendance, seed_employee, test_pool, time, today};
use hrms_lite::api::attendance::{AttendanceQuery, MarkAttendance, UpdateAttendance};
use hrms_lite::api::employee::{CreateEmployee, UpdateEmployee};
use hrms_lite::error::AppError;
use hrms_lite::model::attendance::AttendanceStatus;
use hrms_lite::repository::attendance_repo::AttendanceRepository;
use hrms_lite::service::attendance_service::AttendanceService;
use hrms_lite::service::employee_service::EmployeeService;

fn mark(employee_id: &str, date: chrono::NaiveDate, status: AttendanceStatus) -> MarkAttendance {
    MarkAttendance {
        employee_id: employee_id.to_string(),
        date,
        status,
        check_in: None,
        check_out: None,
        notes: None,
    }
}

#[actix_web::test]
async fn marking_attendance_denormalizes_the_employee() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;

    let attendance = service
        .mark_attendance(MarkAttendance {
            employee_id: employee.id.clone(),
            date: today(),
            status: AttendanceStatus::Present,
            check_in: Some(time(9, 0)),
            check_out: Some(time(18, 0)),
            notes: Some("on site".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(attendance.employee_id, employee.id);
    assert_eq!(attendance.employee_name, employee.name);
    assert_eq!(attendance.employee_code, "EMP-001");
    assert_eq!(attendance.status, "PRESENT");
    assert_eq!(attendance.check_in, Some(time(9, 0)));
    assert_eq!(attendance.created_at, attendance.updated_at);
}

#[actix_web::test]
async fn unknown_employee_is_a_friendly_not_found() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let err = service
        .mark_attendance(mark("no-such-employee", today(), AttendanceStatus::Present))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(err.error_code(), "EMPLOYEE_NOT_FOUND");
}

#[actix_web::test]
async fn future_dates_are_rejected() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;

    let err = service
        .mark_attendance(mark(&employee.id, days_ago(-1), AttendanceStatus::Present))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(err.error_code(), "FUTURE_DATE");
}

#[actix_web::test]
async fn dates_before_joining_are_rejected() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    // joined 365 days ago
    let err = service
        .mark_attendance(mark(&employee.id, days_ago(400), AttendanceStatus::Present))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(err.error_code(), "ATTENDANCE_BEFORE_JOINING");
}

#[actix_web::test]
async fn future_date_check_wins_over_joining_check() {
    let pool = test_pool().await;
    let employees = EmployeeService::new(pool.clone());
    let service = AttendanceService::new(pool.clone());

    // Joins five days from now; tomorrow is both future and pre-joining.
    let employee = employees
        .create_employee(CreateEmployee {
            employee_code: "EMP-001".to_string(),
            name: "Future Hire".to_string(),
            email: "future@acme.com".to_string(),
            department: "Engineering".to_string(),
            designation: None,
            date_of_joining: days_ago(-5),
            phone: None,
        })
        .await
        .unwrap();

    let err = service
        .mark_attendance(mark(&employee.id, days_ago(-1), AttendanceStatus::Present))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "FUTURE_DATE");
}

#[actix_web::test]
async fn second_write_for_the_same_day_is_rejected_not_upserted() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    let first = seed_attendance(&pool, &employee.id, today(), AttendanceStatus::Present).await;

    let err = service
        .mark_attendance(mark(&employee.id, today(), AttendanceStatus::Absent))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.error_code(), "ATTENDANCE_DUPLICATE");

    // The original record is untouched
    let unchanged = service.get_attendance(&first.id).await.unwrap();
    assert_eq!(unchanged.status, "PRESENT");
}

#[actix_web::test]
async fn check_out_must_be_after_check_in_on_create() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;

    let err = service
        .mark_attendance(MarkAttendance {
            employee_id: employee.id.clone(),
            date: today(),
            status: AttendanceStatus::Present,
            check_in: Some(time(18, 0)),
            check_out: Some(time(9, 0)),
            notes: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "CHECK_OUT_BEFORE_CHECK_IN");
}

#[actix_web::test]
async fn inactive_employees_can_still_be_marked() {
    let pool = test_pool().await;
    let employees = EmployeeService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    employees
        .update_employee(
            &employee.id,
            UpdateEmployee {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    seed_attendance(&pool, &employee.id, today(), AttendanceStatus::OnLeave).await;
}

#[actix_web::test]
async fn partial_update_leaves_employee_and_date_untouched() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    let created = seed_attendance(&pool, &employee.id, days_ago(1), AttendanceStatus::Present).await;
    sleep(Duration::from_millis(5)).await;

    let updated = service
        .update_attendance(
            &created.id,
            UpdateAttendance {
                status: Some(AttendanceStatus::HalfDay),
                notes: Some("left early".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, "HALF_DAY");
    assert_eq!(updated.notes.as_deref(), Some("left early"));
    assert_eq!(updated.employee_id, created.employee_id);
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[actix_web::test]
async fn update_validates_the_effective_time_pair() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    let created = service
        .mark_attendance(MarkAttendance {
            employee_id: employee.id.clone(),
            date: today(),
            status: AttendanceStatus::Present,
            check_in: Some(time(9, 0)),
            check_out: None,
            notes: None,
        })
        .await
        .unwrap();

    // check_out earlier than the stored check_in
    let err = service
        .update_attendance(
            &created.id,
            UpdateAttendance {
                check_out: Some(time(8, 0)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "CHECK_OUT_BEFORE_CHECK_IN");
}

#[actix_web::test]
async fn delete_is_terminal() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    let created = seed_attendance(&pool, &employee.id, today(), AttendanceStatus::Present).await;

    service.delete_attendance(&created.id).await.unwrap();

    let err = service.get_attendance(&created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(err.error_code(), "ATTENDANCE_NOT_FOUND");
}

#[actix_web::test]
async fn listing_filters_and_orders_by_date_then_recency() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let jane = seed_employee(&pool, "ENG-001", "jane@acme.com", "Engineering").await;
    let john = seed_employee(&pool, "SAL-001", "john@acme.com", "Sales").await;

    seed_attendance(&pool, &jane.id, days_ago(2), AttendanceStatus::Absent).await;
    sleep(Duration::from_millis(3)).await;
    seed_attendance(&pool, &jane.id, days_ago(1), AttendanceStatus::Present).await;
    sleep(Duration::from_millis(3)).await;
    seed_attendance(&pool, &john.id, days_ago(1), AttendanceStatus::OnLeave).await;

    // Date desc, then insertion recency within the same date
    let all = service.list_attendance(AttendanceQuery::default()).await.unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.items[0].employee_code, "SAL-001");
    assert_eq!(all.items[1].employee_code, "ENG-001");
    assert_eq!(all.items[2].date, days_ago(2));

    // By employee
    let janes = service
        .list_attendance(AttendanceQuery {
            employee_id: Some(jane.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(janes.total, 2);

    // By department (join against employee)
    let sales = service
        .list_attendance(AttendanceQuery {
            department: Some("Sales".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sales.total, 1);
    assert_eq!(sales.items[0].employee_code, "SAL-001");

    // By status
    let present = service
        .list_attendance(AttendanceQuery {
            status: Some("PRESENT".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(present.total, 1);

    // By date range
    let recent = service
        .list_attendance(AttendanceQuery {
            date_from: Some(days_ago(1)),
            date_to: Some(today()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(recent.total, 2);

    // Exact date
    let day_before = service
        .list_attendance(AttendanceQuery {
            date: Some(days_ago(2)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(day_before.total, 1);
}

#[actix_web::test]
async fn listing_caps_per_page_and_keeps_totals_exact() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    for n in 1..=3 {
        seed_attendance(&pool, &employee.id, days_ago(n), AttendanceStatus::Present).await;
    }

    let capped = service
        .list_attendance(AttendanceQuery {
            per_page: Some(1000),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(capped.per_page, 100);
    assert_eq!(capped.total, 3);

    let page2 = service
        .list_attendance(AttendanceQuery {
            page: Some(2),
            per_page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page2.items.len(), 1);
    assert_eq!(page2.total, 3);
}

#[actix_web::test]
async fn repository_probe_finds_the_unique_pair() {
    let pool = test_pool().await;
    let repo = AttendanceRepository::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    let created = seed_attendance(&pool, &employee.id, today(), AttendanceStatus::Present).await;

    let probe = repo
        .get_by_employee_and_date(&employee.id, today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(probe.id, created.id);

    assert!(
        repo.get_by_employee_and_date(&employee.id, days_ago(1))
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn an_absurd_page_number_returns_an_empty_page() {
    let pool = test_pool().await;
    let service = AttendanceService::new(pool.clone());

    let employee = seed_employee(&pool, "EMP-001", "jane@acme.com", "Engineering").await;
    seed_attendance(&pool, &employee.id, today(), AttendanceStatus::Present).await;

    let page = service
        .list_attendance(AttendanceQuery {
            page: Some(u32::MAX),
            per_page: Some(100),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);
}
