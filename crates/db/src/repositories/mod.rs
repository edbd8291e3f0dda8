//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Page/limit inputs from the HTTP
//! layer are clamped here before reaching SQL.

pub mod log_repo;
pub mod request_repo;
pub mod slot_repo;
pub mod user_repo;
pub mod vehicle_repo;

pub use log_repo::LogRepo;
pub use request_repo::RequestRepo;
pub use slot_repo::SlotRepo;
pub use user_repo::UserRepo;
pub use vehicle_repo::VehicleRepo;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Hard cap on page size.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a client-supplied page size to `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

/// Clamp a client-supplied 1-based page number to `1..`.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Compute the OFFSET for a clamped page/limit pair.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

/// Wrap a search term in `%` wildcards for ILIKE substring matching.
///
/// An empty or missing term matches everything.
pub fn like_pattern(search: Option<&str>) -> String {
    format!("%{}%", search.unwrap_or("").trim())
}
