//! Repository for the `vehicles` table.

use parkhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges};

/// Column list for vehicles queries.
const COLUMNS: &str = "id, user_id, plate_number, vehicle_type, size, created_at";

/// Provides CRUD operations for vehicles.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Insert a new vehicle, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewVehicle) -> Result<Vehicle, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicles (user_id, plate_number, vehicle_type, size)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(input.user_id)
            .bind(&input.plate_number)
            .bind(&input.vehicle_type)
            .bind(&input.size)
            .fetch_one(pool)
            .await
    }

    /// Find a vehicle by id, guarded by owner.
    ///
    /// Used by the request ledger to confirm the referenced vehicle belongs
    /// to the caller before accepting a booking.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a page of vehicles matching a plate or type search.
    ///
    /// `owner = Some(user_id)` restricts to that user's vehicles.
    pub async fn list_page(
        pool: &PgPool,
        owner: Option<DbId>,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Vehicle>, sqlx::Error> {
        match owner {
            Some(user_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM vehicles
                     WHERE (plate_number ILIKE $1 OR vehicle_type ILIKE $1) AND user_id = $2
                     ORDER BY id
                     LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, Vehicle>(&query)
                    .bind(pattern)
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM vehicles
                     WHERE plate_number ILIKE $1 OR vehicle_type ILIKE $1
                     ORDER BY id
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Vehicle>(&query)
                    .bind(pattern)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count vehicles matching a listing filter.
    pub async fn count(
        pool: &PgPool,
        owner: Option<DbId>,
        pattern: &str,
    ) -> Result<i64, sqlx::Error> {
        match owner {
            Some(user_id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*)::BIGINT FROM vehicles
                     WHERE (plate_number ILIKE $1 OR vehicle_type ILIKE $1) AND user_id = $2",
                )
                .bind(pattern)
                .bind(user_id)
                .fetch_one(pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*)::BIGINT FROM vehicles
                     WHERE plate_number ILIKE $1 OR vehicle_type ILIKE $1",
                )
                .bind(pattern)
                .fetch_one(pool)
                .await
            }
        }
    }

    /// Update a vehicle, guarded by owner.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        changes: &VehicleChanges,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicles SET plate_number = $1, vehicle_type = $2, size = $3
             WHERE id = $4 AND user_id = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(&changes.plate_number)
            .bind(&changes.vehicle_type)
            .bind(&changes.size)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a vehicle, guarded by owner. Returns `true` if a row was removed.
    pub async fn delete_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
