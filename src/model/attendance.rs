use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Closed set of attendance status values. The DB carries a matching CHECK
/// constraint; this enum is the request-side gate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    OnLeave,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = "b2a9d7e0-5f3c-4e8a-8c21-0d9e8f7a6b5c")]
    pub id: String,

    /// References exactly one employee; immutable after creation
    #[schema(example = "3f7c1a52-8d9b-4f06-9f0e-6a1a2b3c4d5e")]
    pub employee_id: String,

    /// Forms the uniqueness pair with employee_id; immutable after creation
    #[schema(example = "2024-06-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "PRESENT")]
    pub status: String,

    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub check_in: Option<NaiveTime>,

    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub check_out: Option<NaiveTime>,

    #[schema(nullable = true)]
    pub notes: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// Attendance row with the owning employee denormalized in the same round
/// trip. Listings and single fetches use one JOIN, never per-row lookups.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceWithEmployee {
    pub id: String,
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub employee_name: String,

    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[schema(example = "2024-06-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "PRESENT")]
    pub status: String,

    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub check_in: Option<NaiveTime>,

    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub check_out: Option<NaiveTime>,

    #[schema(nullable = true)]
    pub notes: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

impl AttendanceWithEmployee {
    /// The attendance-owned columns, without the joined employee fields.
    pub fn record(&self) -> Attendance {
        Attendance {
            id: self.id.clone(),
            employee_id: self.employee_id.clone(),
            date: self.date,
            status: self.status.clone(),
            check_in: self.check_in,
            check_out: self.check_out,
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
