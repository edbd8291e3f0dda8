//! Route definitions for the admin user directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User directory routes, nested under `/admin/users`.
///
/// ```text
/// GET    /    list_users   (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(users::list_users))
}
