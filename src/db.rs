use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Schema bootstrap. Migration tooling is out of scope; tables are created
/// on startup if missing. The store enforces the invariant-bearing
/// constraints: UNIQUE(email), UNIQUE(employee_code),
/// UNIQUE(employee_id, date), the closed status set, and ON DELETE CASCADE
/// from employee to attendance.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employee (
        id              TEXT PRIMARY KEY,
        employee_code   TEXT NOT NULL UNIQUE,
        name            TEXT NOT NULL,
        email           TEXT NOT NULL UNIQUE,
        department      TEXT NOT NULL,
        designation     TEXT,
        date_of_joining TEXT NOT NULL,
        phone           TEXT,
        is_active       INTEGER NOT NULL DEFAULT 1,
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_employee_department ON employee(department)",
    "CREATE INDEX IF NOT EXISTS idx_employee_is_active ON employee(is_active)",
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id          TEXT PRIMARY KEY,
        employee_id TEXT NOT NULL REFERENCES employee(id) ON DELETE CASCADE,
        date        TEXT NOT NULL,
        status      TEXT NOT NULL
                    CHECK (status IN ('PRESENT', 'ABSENT', 'HALF_DAY', 'ON_LEAVE')),
        check_in    TEXT,
        check_out   TEXT,
        notes       TEXT,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        UNIQUE (employee_id, date)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_attendance_employee ON attendance(employee_id)",
    "CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date)",
];

/// SQLite does not enforce foreign keys unless asked; `foreign_keys(true)`
/// is what makes the employee -> attendance cascade real.
pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("DATABASE_URL is not a valid sqlite URL")
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database")
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
