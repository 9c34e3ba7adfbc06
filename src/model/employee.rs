use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "3f7c1a52-8d9b-4f06-9f0e-6a1a2b3c4d5e",
        "employee_code": "EMP-001",
        "name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering",
        "designation": "Software Engineer",
        "date_of_joining": "2024-01-01",
        "phone": "+8801712345678",
        "is_active": true,
        "created_at": "2024-01-01T09:00:00Z",
        "updated_at": "2024-01-01T09:00:00Z"
    })
)]
pub struct Employee {
    /// UUID primary key, non-enumerable and immutable
    #[schema(example = "3f7c1a52-8d9b-4f06-9f0e-6a1a2b3c4d5e")]
    pub id: String,

    /// Immutable business identifier, globally unique, stored uppercase
    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[schema(example = "John Doe")]
    pub name: String,

    /// Globally unique, stored lowercase
    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "Software Engineer", nullable = true)]
    pub designation: Option<String>,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date_of_joining: NaiveDate,

    #[schema(example = "+8801712345678", nullable = true)]
    pub phone: Option<String>,

    /// Soft-disables the employee for aggregate counts; attendance
    /// operations are unaffected
    #[schema(example = true)]
    pub is_active: bool,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}
