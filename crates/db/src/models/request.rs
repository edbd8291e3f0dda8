//! Slot request entity model, joined projections, and DTOs.

use parkhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `slot_requests` table.
///
/// `slot_id`, `slot_number`, and `approved_at` are populated only when the
/// request reaches `approved`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlotRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub vehicle_id: DbId,
    pub request_status: String,
    pub entry_time: Timestamp,
    pub exit_time: Timestamp,
    pub amount: i64,
    pub slot_id: Option<DbId>,
    pub slot_number: Option<String>,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A request joined with its vehicle's plate and type, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestWithVehicle {
    pub id: DbId,
    pub user_id: DbId,
    pub vehicle_id: DbId,
    pub request_status: String,
    pub entry_time: Timestamp,
    pub exit_time: Timestamp,
    pub amount: i64,
    pub slot_id: Option<DbId>,
    pub slot_number: Option<String>,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub plate_number: String,
    pub vehicle_type: String,
}

/// A pending request joined with vehicle compatibility fields and the
/// requester's contact address, loaded at the start of approve/reject.
#[derive(Debug, Clone, FromRow)]
pub struct PendingDecision {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: i64,
    pub vehicle_type: String,
    pub size: String,
    pub plate_number: String,
    pub email: String,
}

/// Insert parameters for a new request (amount already computed).
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub user_id: DbId,
    pub vehicle_id: DbId,
    pub entry_time: Timestamp,
    pub exit_time: Timestamp,
    pub amount: i64,
}

/// Update parameters for a pending request (amount already recomputed).
#[derive(Debug, Clone)]
pub struct RequestChanges {
    pub vehicle_id: DbId,
    pub entry_time: Timestamp,
    pub exit_time: Timestamp,
    pub amount: i64,
}
