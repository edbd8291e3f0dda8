//! Repository for the `parking_slots` table.

use parkhub_core::status::SLOT_AVAILABLE;
use parkhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::slot::{NewSlot, ParkingSlot, SlotChanges};

/// Column list for parking_slots queries.
const COLUMNS: &str = "id, slot_number, size, vehicle_type, location, status, created_at";

/// Provides CRUD and candidate-lookup operations for parking slots.
pub struct SlotRepo;

impl SlotRepo {
    /// Insert a batch of slots with a single multi-row INSERT.
    pub async fn bulk_create(
        pool: &PgPool,
        slots: &[NewSlot],
    ) -> Result<Vec<ParkingSlot>, sqlx::Error> {
        if slots.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            String::from("INSERT INTO parking_slots (slot_number, size, vehicle_type, location) VALUES ");
        let mut param_idx = 1u32;
        for i in 0..slots.len() {
            if i > 0 {
                query.push_str(", ");
            }
            query.push_str(&format!(
                "(${}, ${}, ${}, ${})",
                param_idx,
                param_idx + 1,
                param_idx + 2,
                param_idx + 3
            ));
            param_idx += 4;
        }
        query.push_str(&format!(" RETURNING {COLUMNS}"));

        let mut q = sqlx::query_as::<_, ParkingSlot>(&query);
        for slot in slots {
            q = q
                .bind(&slot.slot_number)
                .bind(&slot.size)
                .bind(&slot.vehicle_type)
                .bind(&slot.location);
        }
        q.fetch_all(pool).await
    }

    /// List a page of slots matching a slot-number or vehicle-type search.
    ///
    /// `only_available` restricts the listing to claimable slots (the
    /// non-admin view).
    pub async fn list_page(
        pool: &PgPool,
        pattern: &str,
        only_available: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ParkingSlot>, sqlx::Error> {
        if only_available {
            let query = format!(
                "SELECT {COLUMNS} FROM parking_slots
                 WHERE (slot_number ILIKE $1 OR vehicle_type ILIKE $1) AND status = $2
                 ORDER BY id
                 LIMIT $3 OFFSET $4"
            );
            sqlx::query_as::<_, ParkingSlot>(&query)
                .bind(pattern)
                .bind(SLOT_AVAILABLE)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
        } else {
            let query = format!(
                "SELECT {COLUMNS} FROM parking_slots
                 WHERE slot_number ILIKE $1 OR vehicle_type ILIKE $1
                 ORDER BY id
                 LIMIT $2 OFFSET $3"
            );
            sqlx::query_as::<_, ParkingSlot>(&query)
                .bind(pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
        }
    }

    /// Count slots matching a listing filter.
    pub async fn count(
        pool: &PgPool,
        pattern: &str,
        only_available: bool,
    ) -> Result<i64, sqlx::Error> {
        if only_available {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*)::BIGINT FROM parking_slots
                 WHERE (slot_number ILIKE $1 OR vehicle_type ILIKE $1) AND status = $2",
            )
            .bind(pattern)
            .bind(SLOT_AVAILABLE)
            .fetch_one(pool)
            .await
        } else {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*)::BIGINT FROM parking_slots
                 WHERE slot_number ILIKE $1 OR vehicle_type ILIKE $1",
            )
            .bind(pattern)
            .fetch_one(pool)
            .await
        }
    }

    /// Update a slot's descriptive fields.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &SlotChanges,
    ) -> Result<Option<ParkingSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE parking_slots
             SET slot_number = $1, size = $2, vehicle_type = $3, location = $4
             WHERE id = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingSlot>(&query)
            .bind(&changes.slot_number)
            .bind(&changes.size)
            .bind(&changes.vehicle_type)
            .bind(&changes.location)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a slot, returning its slot number for the audit trail.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM parking_slots WHERE id = $1 RETURNING slot_number",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Candidate slots for an allocation: matching type and size, currently
    /// available, ordered by ascending id (the deterministic tie-break).
    pub async fn find_candidates(
        pool: &PgPool,
        vehicle_type: &str,
        size: &str,
    ) -> Result<Vec<ParkingSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parking_slots
             WHERE vehicle_type = $1 AND size = $2 AND status = $3
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ParkingSlot>(&query)
            .bind(vehicle_type)
            .bind(size)
            .bind(SLOT_AVAILABLE)
            .fetch_all(pool)
            .await
    }

    /// Best-effort location string for a rejection email: any slot matching
    /// the vehicle's type and size, regardless of availability.
    pub async fn find_location_hint(
        pool: &PgPool,
        vehicle_type: &str,
        size: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT location FROM parking_slots
             WHERE vehicle_type = $1 AND size = $2
             ORDER BY id ASC
             LIMIT 1",
        )
        .bind(vehicle_type)
        .bind(size)
        .fetch_optional(pool)
        .await
    }

    /// Find a slot by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ParkingSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parking_slots WHERE id = $1");
        sqlx::query_as::<_, ParkingSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
