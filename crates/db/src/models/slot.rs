//! Parking slot entity model and DTOs.

use parkhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `parking_slots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParkingSlot {
    pub id: DbId,
    pub slot_number: String,
    pub size: String,
    pub vehicle_type: String,
    pub location: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// Insert parameters for a new slot (already normalized and validated).
#[derive(Debug, Clone)]
pub struct NewSlot {
    pub slot_number: String,
    pub size: String,
    pub vehicle_type: String,
    pub location: String,
}

/// Update parameters for an existing slot (already normalized).
#[derive(Debug, Clone)]
pub struct SlotChanges {
    pub slot_number: String,
    pub size: String,
    pub vehicle_type: String,
    pub location: String,
}
