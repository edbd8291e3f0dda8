//! Route definitions for the slot request lifecycle.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

/// Request lifecycle routes, nested under `/requests`.
///
/// ```text
/// POST   /               create_request     (auth)
/// GET    /               list_requests      (auth; admins see all)
/// PUT    /{id}           update_request     (auth; owner, pending only)
/// DELETE /{id}           delete_request     (auth; owner, pending only)
/// POST   /{id}/approve   approve_request    (admin)
/// POST   /{id}/reject    reject_request     (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(requests::create_request).get(requests::list_requests),
        )
        .route(
            "/{id}",
            put(requests::update_request).delete(requests::delete_request),
        )
        .route("/{id}/approve", post(requests::approve_request))
        .route("/{id}/reject", post(requests::reject_request))
}
