//! Handlers for the audit trail.

use axum::extract::{Query, State};
use axum::Json;

use parkhub_db::models::log::LogEntry;
use parkhub_db::repositories::{clamp_limit, clamp_page, like_pattern, page_offset, LogRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::PagedResponse;
use crate::state::AppState;

/// GET /api/v1/logs
///
/// List audit entries, newest first, searchable by action text. Admin only.
pub async fn list_logs(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PagedResponse<LogEntry>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let pattern = like_pattern(params.search.as_deref());

    let total = LogRepo::count(&state.pool, &pattern).await?;
    let rows = LogRepo::list_page(&state.pool, &pattern, limit, page_offset(page, limit)).await?;

    Ok(Json(PagedResponse::new(rows, total, page, limit)))
}
