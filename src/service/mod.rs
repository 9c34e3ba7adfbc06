pub mod attendance_service;
pub mod dashboard_service;
pub mod employee_service;

/// Ceiling applied to caller-requested page sizes on every listing.
pub const MAX_PER_PAGE: u32 = 100;
