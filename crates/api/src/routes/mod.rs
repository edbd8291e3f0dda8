pub mod auth;
pub mod health;
pub mod logs;
pub mod requests;
pub mod slots;
pub mod users;
pub mod vehicles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/verify-otp               verify account (public)
/// /auth/login                    login (public)
///
/// /requests                      create, list
/// /requests/{id}                 update, delete (owner, pending only)
/// /requests/{id}/approve         allocate a slot (admin)
/// /requests/{id}/reject          reject with reason (admin)
///
/// /slots/bulk                    bulk create (admin)
/// /slots                         list
/// /slots/{id}                    update, delete (admin)
///
/// /vehicles                      create, list
/// /vehicles/{id}                 update, delete (owner)
///
/// /admin/users                   list accounts (admin)
///
/// /logs                          audit trail (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/requests", requests::router())
        .nest("/slots", slots::router())
        .nest("/vehicles", vehicles::router())
        .nest("/admin/users", users::router())
        .nest("/logs", logs::router())
}
