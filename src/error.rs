use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;
use serde_json::{Value, json};
use tracing::error;

/// Domain error for the service layer.
///
/// Every variant carries a machine-readable `code`, a human-readable
/// `message` and optional structured `details`. Raw store internals (SQL
/// text, table or column names) never end up in here; services translate
/// constraint violations before this type crosses the HTTP boundary.
#[derive(Debug, Display)]
pub enum AppError {
    /// Referenced entity does not exist (404).
    #[display(fmt = "{}", message)]
    NotFound {
        code: &'static str,
        message: String,
        details: Option<Value>,
    },
    /// Uniqueness violation on email, code or attendance date (409).
    #[display(fmt = "{}", message)]
    Conflict {
        code: &'static str,
        message: String,
        details: Option<Value>,
    },
    /// Business-rule violation caught before the store is touched (422).
    #[display(fmt = "{}", message)]
    Validation {
        code: &'static str,
        message: String,
        details: Option<Value>,
    },
    /// Too many requests in the window (429). Produced by the rate-limiting
    /// middleware, carried here for contract completeness.
    #[display(fmt = "Too many requests. Please try again later.")]
    RateLimited { retry_after_seconds: u64 },
    /// Anything unanticipated (500). Logged with full context server-side,
    /// returned to the caller as an opaque message.
    #[display(fmt = "Internal Server Error")]
    Internal(anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(
        code: &'static str,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        AppError::NotFound {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn conflict(
        code: &'static str,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        AppError::Conflict {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn validation(
        code: &'static str,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        AppError::Validation {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        AppError::Internal(err.into())
    }

    /// Machine-readable code for the error body.
    pub fn error_code(&self) -> &str {
        match self {
            AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Validation { code, .. } => code,
            AppError::RateLimited { .. } => "RATE_LIMIT_EXCEEDED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.into())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound { code, message, details }
            | AppError::Conflict { code, message, details }
            | AppError::Validation { code, message, details } => json!({
                "error_code": code,
                "message": message,
                "details": details,
            }),
            AppError::RateLimited { retry_after_seconds } => json!({
                "error_code": "RATE_LIMIT_EXCEEDED",
                "message": "Too many requests. Please try again later.",
                "details": { "retry_after_seconds": retry_after_seconds },
            }),
            AppError::Internal(err) => {
                error!(error = ?err, "Unhandled internal error");
                json!({
                    "error_code": "INTERNAL_ERROR",
                    "message": "Something went wrong, contact the system admin",
                    "details": null,
                })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn status_codes_follow_error_kind() {
        let nf = AppError::not_found("EMPLOYEE_NOT_FOUND", "Employee not found", None);
        assert_eq!(nf.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(nf.error_code(), "EMPLOYEE_NOT_FOUND");

        let conflict = AppError::conflict("ATTENDANCE_DUPLICATE", "dup", None);
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);

        let validation = AppError::validation("FUTURE_DATE", "future", None);
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let limited = AppError::RateLimited {
            retry_after_seconds: 3,
        };
        assert_eq!(limited.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let internal = AppError::internal(anyhow::anyhow!("boom"));
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.error_code(), "INTERNAL_ERROR");
    }
}
