//! Route definitions for vehicles.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::vehicles;
use crate::state::AppState;

/// Vehicle routes, nested under `/vehicles`.
///
/// ```text
/// POST   /        create_vehicle   (auth)
/// GET    /        list_vehicles    (auth; admins see all)
/// PUT    /{id}    update_vehicle   (auth; owner)
/// DELETE /{id}    delete_vehicle   (auth; owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(vehicles::create_vehicle).get(vehicles::list_vehicles),
        )
        .route(
            "/{id}",
            put(vehicles::update_vehicle).delete(vehicles::delete_vehicle),
        )
}
