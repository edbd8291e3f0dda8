//! Route definitions for parking slot management.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::slots;
use crate::state::AppState;

/// Slot management routes, nested under `/slots`.
///
/// ```text
/// POST   /bulk    bulk_create_slots   (admin)
/// GET    /        list_slots          (auth; non-admins see available only)
/// PUT    /{id}    update_slot         (admin)
/// DELETE /{id}    delete_slot         (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bulk", post(slots::bulk_create_slots))
        .route("/", get(slots::list_slots))
        .route("/{id}", put(slots::update_slot).delete(slots::delete_slot))
}
