use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

pub mod attendance;
pub mod dashboard;
pub mod employee;

/// Pagination metadata for list endpoints. `total`/`total_pages` always
/// reflect the full filtered count, not the returned slice.
#[derive(Serialize, ToSchema)]
pub struct PaginationMeta {
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: i64,
    #[schema(example = 3)]
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: u32, per_page: u32, total: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page as i64 - 1) / per_page as i64
        } else {
            0
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "ok",
            "app": "HRMS Lite"
        }))
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "app": "HRMS Lite"
    }))
}
