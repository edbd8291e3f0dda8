use std::sync::Arc;

use parkhub_mailer::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: parkhub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// SMTP mailer handle, built once at startup. `None` when SMTP is not
    /// configured; sends then report `failed` without erroring.
    pub mailer: Option<Arc<Mailer>>,
}
