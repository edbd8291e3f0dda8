//! Handlers for parking slot management.
//!
//! Mutations are admin-only; listing is open to any authenticated caller,
//! with non-admins restricted to available slots.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use parkhub_core::catalog::{normalize_size, normalize_vehicle_type, require_trimmed};
use parkhub_core::error::CoreError;
use parkhub_core::types::DbId;
use parkhub_db::models::slot::{NewSlot, ParkingSlot, SlotChanges};
use parkhub_db::repositories::{clamp_limit, clamp_page, like_pattern, page_offset, SlotRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::record_audit;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PageParams;
use crate::response::PagedResponse;
use crate::state::AppState;

/// One slot in a bulk-create payload. Fields are optional so missing values
/// surface as a 400 validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SlotInput {
    pub slot_number: Option<String>,
    pub size: Option<String>,
    pub vehicle_type: Option<String>,
    pub location: Option<String>,
}

/// Body for the bulk-create endpoint.
#[derive(Debug, Deserialize)]
pub struct BulkCreateBody {
    pub slots: Option<Vec<SlotInput>>,
}

/// Sanitize one slot input: trim everything, lowercase the catalog fields,
/// reject unknown vocabulary or blank values.
fn sanitize_slot(input: &SlotInput) -> Result<(String, String, String, String), AppError> {
    let slot_number = require_trimmed(input.slot_number.as_deref().unwrap_or(""), "Slot number")?;
    let size = normalize_size(input.size.as_deref().unwrap_or(""))?;
    let vehicle_type = normalize_vehicle_type(input.vehicle_type.as_deref().unwrap_or(""))?;
    let location = require_trimmed(input.location.as_deref().unwrap_or(""), "Location")?;
    Ok((slot_number, size, vehicle_type, location))
}

/// POST /api/v1/slots/bulk
///
/// Insert a batch of slots in one statement. Admin only.
pub async fn bulk_create_slots(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<BulkCreateBody>,
) -> AppResult<(StatusCode, Json<Vec<ParkingSlot>>)> {
    let inputs = body
        .slots
        .filter(|slots| !slots.is_empty())
        .ok_or_else(|| {
            CoreError::Validation("Slots array is required and cannot be empty".into())
        })?;

    let mut new_slots = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let (slot_number, size, vehicle_type, location) = sanitize_slot(input)?;
        new_slots.push(NewSlot {
            slot_number,
            size,
            vehicle_type,
            location,
        });
    }

    let created = SlotRepo::bulk_create(&state.pool, &new_slots).await?;

    record_audit(
        &state.pool,
        admin.user_id,
        &format!("Bulk created {} slots", created.len()),
    )
    .await;

    tracing::info!(user_id = admin.user_id, count = created.len(), "Slots bulk created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/slots
///
/// List slots, searchable by slot number or vehicle type. Non-admin callers
/// see only available slots.
pub async fn list_slots(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PagedResponse<ParkingSlot>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let pattern = like_pattern(params.search.as_deref());
    let only_available = !user.is_admin();

    let total = SlotRepo::count(&state.pool, &pattern, only_available).await?;
    let rows = SlotRepo::list_page(
        &state.pool,
        &pattern,
        only_available,
        limit,
        page_offset(page, limit),
    )
    .await?;

    record_audit(&state.pool, user.user_id, "Slots list viewed").await;

    Ok(Json(PagedResponse::new(rows, total, page, limit)))
}

/// PUT /api/v1/slots/{id}
///
/// Update a slot's descriptive fields. Admin only.
pub async fn update_slot(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SlotInput>,
) -> AppResult<Json<ParkingSlot>> {
    let (slot_number, size, vehicle_type, location) = sanitize_slot(&input)?;

    let slot = SlotRepo::update(
        &state.pool,
        id,
        &SlotChanges {
            slot_number,
            size,
            vehicle_type,
            location,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "ParkingSlot",
        id,
    }))?;

    record_audit(
        &state.pool,
        admin.user_id,
        &format!("Slot {} updated", slot.slot_number),
    )
    .await;

    Ok(Json(slot))
}

/// DELETE /api/v1/slots/{id}
///
/// Remove a slot. Admin only.
pub async fn delete_slot(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let slot_number = SlotRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ParkingSlot",
            id,
        }))?;

    record_audit(
        &state.pool,
        admin.user_id,
        &format!("Slot {slot_number} deleted"),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
