pub mod attendance_repo;
pub mod dashboard_repo;
pub mod employee_repo;

/// One page of a filtered listing. `total` comes from a parallel count query
/// running the same WHERE clause as the data query, so pagination metadata
/// stays exact under any filter combination.
#[derive(Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
