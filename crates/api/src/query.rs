//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination + search parameters (`?page=&limit=&search=`).
///
/// Used by every paginated list endpoint. Values are clamped in the
/// repository layer via `clamp_page` / `clamp_limit`; `search` is a
/// case-insensitive substring match whose target fields vary per resource.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}
