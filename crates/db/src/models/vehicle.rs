//! Vehicle entity model and DTOs.

use parkhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: DbId,
    pub user_id: DbId,
    pub plate_number: String,
    pub vehicle_type: String,
    pub size: String,
    pub created_at: Timestamp,
}

/// Insert parameters for a new vehicle (already normalized and validated).
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub user_id: DbId,
    pub plate_number: String,
    pub vehicle_type: String,
    pub size: String,
}

/// Update parameters for an existing vehicle (already normalized).
#[derive(Debug, Clone)]
pub struct VehicleChanges {
    pub plate_number: String,
    pub vehicle_type: String,
    pub size: String,
}
