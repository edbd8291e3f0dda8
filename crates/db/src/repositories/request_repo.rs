//! Repository for the `slot_requests` table, including the slot-allocation
//! transaction performed on approval.

use parkhub_core::status::{
    REQUEST_APPROVED, REQUEST_PENDING, REQUEST_REJECTED, SLOT_AVAILABLE, SLOT_UNAVAILABLE,
};
use parkhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::request::{
    NewRequest, PendingDecision, RequestChanges, RequestWithVehicle, SlotRequest,
};

/// Column list for slot_requests queries.
const COLUMNS: &str = "id, user_id, vehicle_id, request_status, entry_time, exit_time, \
    amount, slot_id, slot_number, approved_at, created_at";

/// Column list for listings joined with the vehicle (aliased `sr` / `v`).
const JOINED_COLUMNS: &str = "sr.id, sr.user_id, sr.vehicle_id, sr.request_status, \
    sr.entry_time, sr.exit_time, sr.amount, sr.slot_id, sr.slot_number, sr.approved_at, \
    sr.created_at, v.plate_number, v.vehicle_type";

/// Provides lifecycle operations for slot requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a new pending request, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewRequest) -> Result<SlotRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO slot_requests
                (user_id, vehicle_id, request_status, entry_time, exit_time, amount)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotRequest>(&query)
            .bind(input.user_id)
            .bind(input.vehicle_id)
            .bind(REQUEST_PENDING)
            .bind(input.entry_time)
            .bind(input.exit_time)
            .bind(input.amount)
            .fetch_one(pool)
            .await
    }

    /// List a page of requests joined with vehicle plate/type.
    ///
    /// The search term matches plate number or request status
    /// (case-insensitive substring). `owner = Some(user_id)` restricts the
    /// listing to that user's requests; `None` (admin) sees everything.
    pub async fn list_page(
        pool: &PgPool,
        owner: Option<DbId>,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RequestWithVehicle>, sqlx::Error> {
        match owner {
            Some(user_id) => {
                let query = format!(
                    "SELECT {JOINED_COLUMNS} FROM slot_requests sr
                     JOIN vehicles v ON sr.vehicle_id = v.id
                     WHERE (v.plate_number ILIKE $1 OR sr.request_status ILIKE $1)
                       AND sr.user_id = $2
                     ORDER BY sr.id
                     LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, RequestWithVehicle>(&query)
                    .bind(pattern)
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {JOINED_COLUMNS} FROM slot_requests sr
                     JOIN vehicles v ON sr.vehicle_id = v.id
                     WHERE (v.plate_number ILIKE $1 OR sr.request_status ILIKE $1)
                     ORDER BY sr.id
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, RequestWithVehicle>(&query)
                    .bind(pattern)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count the requests matching a listing filter (pagination metadata).
    pub async fn count(
        pool: &PgPool,
        owner: Option<DbId>,
        pattern: &str,
    ) -> Result<i64, sqlx::Error> {
        match owner {
            Some(user_id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*)::BIGINT FROM slot_requests sr
                     JOIN vehicles v ON sr.vehicle_id = v.id
                     WHERE (v.plate_number ILIKE $1 OR sr.request_status ILIKE $1)
                       AND sr.user_id = $2",
                )
                .bind(pattern)
                .bind(user_id)
                .fetch_one(pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*)::BIGINT FROM slot_requests sr
                     JOIN vehicles v ON sr.vehicle_id = v.id
                     WHERE (v.plate_number ILIKE $1 OR sr.request_status ILIKE $1)",
                )
                .bind(pattern)
                .fetch_one(pool)
                .await
            }
        }
    }

    /// Load a pending request with vehicle compatibility fields and requester
    /// contact, for an approve/reject decision.
    ///
    /// Returns `None` when the request is missing or no longer pending -- the
    /// callers treat both the same way.
    pub async fn find_pending_decision(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PendingDecision>, sqlx::Error> {
        sqlx::query_as::<_, PendingDecision>(
            "SELECT sr.id, sr.user_id, sr.amount, v.vehicle_type, v.size, v.plate_number, u.email
             FROM slot_requests sr
             JOIN vehicles v ON sr.vehicle_id = v.id
             JOIN users u ON sr.user_id = u.id
             WHERE sr.id = $1 AND sr.request_status = $2",
        )
        .bind(id)
        .bind(REQUEST_PENDING)
        .fetch_optional(pool)
        .await
    }

    /// Update a request's vehicle and booking window.
    ///
    /// Guarded by owner and `pending` status in the UPDATE predicate, so a
    /// request that is missing, foreign, or already decided yields `None`.
    pub async fn update_pending(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        changes: &RequestChanges,
    ) -> Result<Option<SlotRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE slot_requests
             SET vehicle_id = $1, entry_time = $2, exit_time = $3, amount = $4
             WHERE id = $5 AND user_id = $6 AND request_status = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotRequest>(&query)
            .bind(changes.vehicle_id)
            .bind(changes.entry_time)
            .bind(changes.exit_time)
            .bind(changes.amount)
            .bind(id)
            .bind(user_id)
            .bind(REQUEST_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Delete a request, guarded by owner and `pending` status.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_pending(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM slot_requests
             WHERE id = $1 AND user_id = $2 AND request_status = $3",
        )
        .bind(id)
        .bind(user_id)
        .bind(REQUEST_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically claim a slot for a pending request.
    ///
    /// Both updates are conditional and run in one transaction:
    /// - the slot flips `available -> unavailable` only if it is still
    ///   available;
    /// - the request flips `pending -> approved` only if it is still pending.
    ///
    /// If either check-and-set misses (a concurrent approval claimed the slot,
    /// or a concurrent decision settled the request), the transaction rolls
    /// back and `None` is returned so the caller can try the next candidate
    /// or give up. `Some(row)` means both writes committed together.
    pub async fn allocate(
        pool: &PgPool,
        request_id: DbId,
        slot_id: DbId,
        slot_number: &str,
    ) -> Result<Option<SlotRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claimed = sqlx::query(
            "UPDATE parking_slots SET status = $1 WHERE id = $2 AND status = $3",
        )
        .bind(SLOT_UNAVAILABLE)
        .bind(slot_id)
        .bind(SLOT_AVAILABLE)
        .execute(&mut *tx)
        .await?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "UPDATE slot_requests
             SET request_status = $1, slot_id = $2, slot_number = $3,
                 approved_at = CURRENT_TIMESTAMP
             WHERE id = $4 AND request_status = $5
             RETURNING {COLUMNS}"
        );
        let approved = sqlx::query_as::<_, SlotRequest>(&query)
            .bind(REQUEST_APPROVED)
            .bind(slot_id)
            .bind(slot_number)
            .bind(request_id)
            .bind(REQUEST_PENDING)
            .fetch_optional(&mut *tx)
            .await?;

        match approved {
            Some(row) => {
                tx.commit().await?;
                Ok(Some(row))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Transition a pending request to `rejected`.
    ///
    /// The `pending` predicate guards against a reject racing a concurrent
    /// approval of the same request; the loser sees `None`.
    pub async fn mark_rejected(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SlotRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE slot_requests SET request_status = $1
             WHERE id = $2 AND request_status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotRequest>(&query)
            .bind(REQUEST_REJECTED)
            .bind(id)
            .bind(REQUEST_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Re-read the persisted slot number and amount after an approval commit.
    ///
    /// Used for the defensive post-commit verification; not required for
    /// correctness.
    pub async fn read_back(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(Option<String>, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (Option<String>, i64)>(
            "SELECT slot_number, amount FROM slot_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a request by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SlotRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slot_requests WHERE id = $1");
        sqlx::query_as::<_, SlotRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
