//! Repository for the append-only `logs` table.

use parkhub_core::audit::truncate_action;
use parkhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::log::LogEntry;

/// Column list for logs queries.
const COLUMNS: &str = "id, user_id, action, created_at";

/// Provides append and listing operations for the audit trail.
///
/// Entries are never updated or deleted.
pub struct LogRepo;

impl LogRepo {
    /// Append an audit entry. The action text is truncated to the column
    /// width before insertion.
    pub async fn append(pool: &PgPool, user_id: DbId, action: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO logs (user_id, action) VALUES ($1, $2)")
            .bind(user_id)
            .bind(truncate_action(action))
            .execute(pool)
            .await?;
        Ok(())
    }

    /// List a page of audit entries, newest first.
    pub async fn list_page(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM logs
             WHERE action ILIKE $1
             ORDER BY id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, LogEntry>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count audit entries matching a listing filter.
    pub async fn count(pool: &PgPool, pattern: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM logs WHERE action ILIKE $1")
            .bind(pattern)
            .fetch_one(pool)
            .await
    }
}
