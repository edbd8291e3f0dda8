//! Handlers for the admin user directory.

use axum::extract::{Query, State};
use axum::Json;

use parkhub_db::models::user::UserResponse;
use parkhub_db::repositories::{clamp_limit, clamp_page, like_pattern, page_offset, UserRepo};

use crate::error::AppResult;
use crate::handlers::record_audit;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::PagedResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users
///
/// List accounts, searchable by name or email. Admin only; responses never
/// include credentials.
pub async fn list_users(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PagedResponse<UserResponse>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let pattern = like_pattern(params.search.as_deref());

    let total = UserRepo::count(&state.pool, &pattern).await?;
    let rows = UserRepo::list_page(&state.pool, &pattern, limit, page_offset(page, limit)).await?;

    record_audit(&state.pool, admin.user_id, "Viewed users").await;

    Ok(Json(PagedResponse::new(rows, total, page, limit)))
}
