//! Handlers for the caller's registered vehicles.
//!
//! Vehicles are owned: every mutation is guarded by the owner in the SQL
//! predicate, and non-admin listings are restricted to the caller's own rows.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use parkhub_core::catalog::{normalize_size, normalize_vehicle_type, require_trimmed};
use parkhub_core::error::CoreError;
use parkhub_core::types::DbId;
use parkhub_db::models::vehicle::{NewVehicle, Vehicle, VehicleChanges};
use parkhub_db::repositories::{clamp_limit, clamp_page, like_pattern, page_offset, VehicleRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::record_audit;
use crate::middleware::rbac::RequireAuth;
use crate::query::PageParams;
use crate::response::PagedResponse;
use crate::state::AppState;

/// Body for creating or updating a vehicle.
#[derive(Debug, Deserialize)]
pub struct VehicleBody {
    pub plate_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub size: Option<String>,
}

fn sanitize_vehicle(body: &VehicleBody) -> Result<(String, String, String), AppError> {
    let plate_number =
        require_trimmed(body.plate_number.as_deref().unwrap_or(""), "Plate number")?;
    let vehicle_type = normalize_vehicle_type(body.vehicle_type.as_deref().unwrap_or(""))?;
    let size = normalize_size(body.size.as_deref().unwrap_or(""))?;
    Ok((plate_number, vehicle_type, size))
}

/// POST /api/v1/vehicles
///
/// Register a vehicle owned by the caller.
pub async fn create_vehicle(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<VehicleBody>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    let (plate_number, vehicle_type, size) = sanitize_vehicle(&body)?;

    let vehicle = VehicleRepo::create(
        &state.pool,
        &NewVehicle {
            user_id: user.user_id,
            plate_number,
            vehicle_type,
            size,
        },
    )
    .await?;

    record_audit(
        &state.pool,
        user.user_id,
        &format!("Vehicle {} registered", vehicle.plate_number),
    )
    .await;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// GET /api/v1/vehicles
///
/// List vehicles, searchable by plate number or type. Non-admin callers see
/// only their own vehicles.
pub async fn list_vehicles(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PagedResponse<Vehicle>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let pattern = like_pattern(params.search.as_deref());
    let owner = if user.is_admin() {
        None
    } else {
        Some(user.user_id)
    };

    let total = VehicleRepo::count(&state.pool, owner, &pattern).await?;
    let rows = VehicleRepo::list_page(
        &state.pool,
        owner,
        &pattern,
        limit,
        page_offset(page, limit),
    )
    .await?;

    record_audit(&state.pool, user.user_id, "Viewed vehicles").await;

    Ok(Json(PagedResponse::new(rows, total, page, limit)))
}

/// PUT /api/v1/vehicles/{id}
///
/// Update a vehicle owned by the caller.
pub async fn update_vehicle(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<VehicleBody>,
) -> AppResult<Json<Vehicle>> {
    let (plate_number, vehicle_type, size) = sanitize_vehicle(&body)?;

    let vehicle = VehicleRepo::update_owned(
        &state.pool,
        id,
        user.user_id,
        &VehicleChanges {
            plate_number,
            vehicle_type,
            size,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Vehicle",
        id,
    }))?;

    record_audit(
        &state.pool,
        user.user_id,
        &format!("Vehicle {} updated", vehicle.plate_number),
    )
    .await;

    Ok(Json(vehicle))
}

/// DELETE /api/v1/vehicles/{id}
///
/// Remove a vehicle owned by the caller.
pub async fn delete_vehicle(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = VehicleRepo::delete_owned(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Vehicle",
            id,
        }));
    }

    record_audit(&state.pool, user.user_id, &format!("Vehicle {id} deleted")).await;

    Ok(StatusCode::NO_CONTENT)
}
