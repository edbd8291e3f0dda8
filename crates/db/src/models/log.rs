//! Audit log entry model.

use parkhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LogEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub created_at: Timestamp,
}
