//! Route definitions for registration, verification, and login.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes, nested under `/auth`.
///
/// ```text
/// POST   /register      register
/// POST   /verify-otp    verify_otp
/// POST   /login         login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/login", post(auth::login))
}
