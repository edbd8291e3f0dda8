//! HTTP handlers, grouped per resource.

pub mod auth;
pub mod logs;
pub mod requests;
pub mod slots;
pub mod users;
pub mod vehicles;

use parkhub_core::types::DbId;
use parkhub_db::repositories::LogRepo;
use parkhub_db::DbPool;

/// Append an audit entry, swallowing failures.
///
/// The audit sink is fire-and-forget: a failed append is logged server-side
/// and never affects the surrounding operation's outcome.
pub(crate) async fn record_audit(pool: &DbPool, user_id: DbId, action: &str) {
    if let Err(err) = LogRepo::append(pool, user_id, action).await {
        tracing::warn!(error = %err, user_id, action, "Failed to append audit log entry");
    }
}
