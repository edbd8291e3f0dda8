//! Route definitions for the audit trail.

use axum::routing::get;
use axum::Router;

use crate::handlers::logs;
use crate::state::AppState;

/// Audit trail routes, nested under `/logs`.
///
/// ```text
/// GET    /    list_logs   (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(logs::list_logs))
}
