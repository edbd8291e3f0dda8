//! Handlers for the slot request lifecycle: the request ledger
//! (create/list/update/delete, owner-scoped) and the allocation procedure
//! (admin approve/reject with best-effort notifications).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use parkhub_core::error::CoreError;
use parkhub_core::tariff::compute_amount;
use parkhub_core::time::parse_utc_instant;
use parkhub_core::types::{DbId, Timestamp};
use parkhub_db::models::request::{NewRequest, RequestChanges, RequestWithVehicle, SlotRequest};
use parkhub_db::models::slot::ParkingSlot;
use parkhub_db::repositories::{
    clamp_limit, clamp_page, like_pattern, page_offset, RequestRepo, SlotRepo, VehicleRepo,
};
use parkhub_mailer::EmailStatus;

use crate::error::{AppError, AppResult};
use crate::handlers::record_audit;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PageParams;
use crate::response::PagedResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for creating or updating a request. All fields are required; they
/// are optional here so missing values surface as a 400 validation error
/// rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct BookingBody {
    pub vehicle_id: Option<DbId>,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
}

/// Body for the reject endpoint.
#[derive(Debug, Deserialize)]
pub struct RejectBody {
    pub reason: Option<String>,
}

/// Result of a successful approval: the primary state transition plus the
/// status of each best-effort notification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOutcome {
    pub message: String,
    pub slot: ParkingSlot,
    pub amount: i64,
    pub approval_email_status: EmailStatus,
    pub payment_email_status: EmailStatus,
}

/// Result of a successful rejection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionOutcome {
    pub message: String,
    pub request: SlotRequest,
    pub email_status: EmailStatus,
}

/// A validated booking window with its computed charge.
#[derive(Debug)]
struct Booking {
    vehicle_id: DbId,
    entry_time: Timestamp,
    exit_time: Timestamp,
    amount: i64,
}

/// Validate a booking body: presence of all fields, parseable UTC instants,
/// chronological window, computed amount.
fn parse_booking(body: &BookingBody) -> Result<Booking, AppError> {
    let missing =
        || CoreError::Validation("Vehicle ID, entry time, and exit time are required".into());

    let vehicle_id = body.vehicle_id.ok_or_else(missing)?;
    let entry_raw = body.entry_time.as_deref().ok_or_else(missing)?;
    let exit_raw = body.exit_time.as_deref().ok_or_else(missing)?;

    let entry_time = parse_utc_instant(entry_raw)?;
    let exit_time = parse_utc_instant(exit_raw)?;
    let amount = compute_amount(entry_time, exit_time)?;

    Ok(Booking {
        vehicle_id,
        entry_time,
        exit_time,
        amount,
    })
}

/// Confirm the referenced vehicle exists and belongs to the caller.
async fn ensure_vehicle_owned(
    state: &AppState,
    vehicle_id: DbId,
    user_id: DbId,
) -> AppResult<()> {
    VehicleRepo::find_owned(&state.pool, vehicle_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vehicle",
            id: vehicle_id,
        }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Request ledger
// ---------------------------------------------------------------------------

/// POST /api/v1/requests
///
/// Create a pending slot request for one of the caller's vehicles.
pub async fn create_request(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<BookingBody>,
) -> AppResult<(StatusCode, Json<SlotRequest>)> {
    let booking = parse_booking(&body)?;
    ensure_vehicle_owned(&state, booking.vehicle_id, user.user_id).await?;

    let request = RequestRepo::create(
        &state.pool,
        &NewRequest {
            user_id: user.user_id,
            vehicle_id: booking.vehicle_id,
            entry_time: booking.entry_time,
            exit_time: booking.exit_time,
            amount: booking.amount,
        },
    )
    .await?;

    record_audit(
        &state.pool,
        user.user_id,
        &format!(
            "Request created for vehicle {}, amount {}",
            booking.vehicle_id, booking.amount
        ),
    )
    .await;

    tracing::info!(
        user_id = user.user_id,
        request_id = request.id,
        amount = request.amount,
        "Slot request created"
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/requests
///
/// List requests joined with vehicle plate/type, searchable by plate number
/// or status. Non-admin callers see only their own requests.
pub async fn list_requests(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PagedResponse<RequestWithVehicle>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let pattern = like_pattern(params.search.as_deref());
    let owner = if user.is_admin() {
        None
    } else {
        Some(user.user_id)
    };

    let total = RequestRepo::count(&state.pool, owner, &pattern).await?;
    let rows = RequestRepo::list_page(
        &state.pool,
        owner,
        &pattern,
        limit,
        page_offset(page, limit),
    )
    .await?;

    record_audit(&state.pool, user.user_id, "Viewed slot requests").await;

    Ok(Json(PagedResponse::new(rows, total, page, limit)))
}

/// PUT /api/v1/requests/{id}
///
/// Update a pending request owned by the caller; recomputes the amount.
pub async fn update_request(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<BookingBody>,
) -> AppResult<Json<SlotRequest>> {
    let booking = parse_booking(&body)?;
    ensure_vehicle_owned(&state, booking.vehicle_id, user.user_id).await?;

    let request = RequestRepo::update_pending(
        &state.pool,
        id,
        user.user_id,
        &RequestChanges {
            vehicle_id: booking.vehicle_id,
            entry_time: booking.entry_time,
            exit_time: booking.exit_time,
            amount: booking.amount,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "SlotRequest",
        id,
    }))?;

    record_audit(
        &state.pool,
        user.user_id,
        &format!("Request {id} updated, amount {}", booking.amount),
    )
    .await;

    Ok(Json(request))
}

/// DELETE /api/v1/requests/{id}
///
/// Delete a pending request owned by the caller.
pub async fn delete_request(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RequestRepo::delete_pending(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SlotRequest",
            id,
        }));
    }

    record_audit(&state.pool, user.user_id, &format!("Request {id} deleted")).await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Allocation procedure
// ---------------------------------------------------------------------------

/// POST /api/v1/requests/{id}/approve
///
/// Approve a pending request: bind it to the first compatible available slot
/// (lowest id first) in one atomic transaction, then send the approval and
/// payment emails as independent best-effort side effects.
pub async fn approve_request(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApprovalOutcome>> {
    let decision = RequestRepo::find_pending_decision(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SlotRequest",
            id,
        }))?;

    let candidates =
        SlotRepo::find_candidates(&state.pool, &decision.vehicle_type, &decision.size).await?;
    if candidates.is_empty() {
        return Err(CoreError::NoCapacity("No compatible slots available".into()).into());
    }

    // Claim candidates in order. A lost claim means a concurrent approval
    // took that slot between our lookup and the conditional update; move on
    // to the next one.
    let mut allocated: Option<ParkingSlot> = None;
    for slot in candidates {
        if slot.slot_number.trim().is_empty() {
            return Err(CoreError::Integrity(format!(
                "Parking slot {} has a blank slot number",
                slot.id
            ))
            .into());
        }

        if RequestRepo::allocate(&state.pool, id, slot.id, &slot.slot_number)
            .await?
            .is_some()
        {
            allocated = Some(slot);
            break;
        }

        tracing::debug!(
            request_id = id,
            slot_id = slot.id,
            "Lost slot claim race, trying next candidate"
        );
    }

    let Some(slot) = allocated else {
        return Err(CoreError::NoCapacity("No compatible slots available".into()).into());
    };

    verify_allocation(&state, id, &slot.slot_number, decision.amount).await;

    let approval_email_status =
        match try_send_approval(&state, &decision.email, &decision.plate_number, &slot).await {
            Ok(()) => EmailStatus::Sent,
            Err(()) => EmailStatus::Failed,
        };
    let payment_email_status = match try_send_payment(
        &state,
        &decision.email,
        &decision.plate_number,
        &slot,
        decision.amount,
    )
    .await
    {
        Ok(()) => EmailStatus::Sent,
        Err(()) => EmailStatus::Failed,
    };

    record_audit(
        &state.pool,
        admin.user_id,
        &format!(
            "Request {id} approved, slot {}, amount {}",
            slot.slot_number, decision.amount
        ),
    )
    .await;

    tracing::info!(
        user_id = admin.user_id,
        request_id = id,
        slot_id = slot.id,
        amount = decision.amount,
        "Request approved"
    );

    Ok(Json(ApprovalOutcome {
        message: format!(
            "Request approved. Payment of {} processed successfully. \
             You may now enter the parking area.",
            decision.amount
        ),
        slot,
        amount: decision.amount,
        approval_email_status,
        payment_email_status,
    }))
}

/// POST /api/v1/requests/{id}/reject
///
/// Reject a pending request with a reason and notify the requester.
pub async fn reject_request(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<RejectBody>,
) -> AppResult<Json<RejectionOutcome>> {
    let reason = body
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| CoreError::Validation("Rejection reason is required".into()))?
        .to_string();

    let decision = RequestRepo::find_pending_decision(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SlotRequest",
            id,
        }))?;

    // Read-only location hint for the rejection email.
    let location =
        SlotRepo::find_location_hint(&state.pool, &decision.vehicle_type, &decision.size)
            .await?
            .unwrap_or_else(|| "unknown".to_string());

    // Conditional transition: a reject racing a concurrent approval of the
    // same request loses here and reports the request as already processed.
    let request = RequestRepo::mark_rejected(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SlotRequest",
            id,
        }))?;

    let email_status = match try_send_rejection(
        &state,
        &decision.email,
        &decision.plate_number,
        &location,
        &reason,
    )
    .await
    {
        Ok(()) => EmailStatus::Sent,
        Err(()) => EmailStatus::Failed,
    };

    record_audit(
        &state.pool,
        admin.user_id,
        &format!("Request {id} rejected, reason: {reason}"),
    )
    .await;

    tracing::info!(
        user_id = admin.user_id,
        request_id = id,
        reason = %reason,
        "Request rejected"
    );

    Ok(Json(RejectionOutcome {
        message: "Request rejected".to_string(),
        request,
        email_status,
    }))
}

// ---------------------------------------------------------------------------
// Side-effect helpers
// ---------------------------------------------------------------------------

/// Defensive post-commit verification: re-read the persisted slot number and
/// amount and log any discrepancy. Never fails the approval.
async fn verify_allocation(state: &AppState, request_id: DbId, slot_number: &str, amount: i64) {
    match RequestRepo::read_back(&state.pool, request_id).await {
        Ok(Some((stored_number, stored_amount))) => {
            if stored_number.as_deref() != Some(slot_number) {
                tracing::error!(
                    request_id,
                    expected = slot_number,
                    stored = ?stored_number,
                    "Slot number mismatch on post-approval read-back"
                );
            }
            if stored_amount != amount {
                tracing::error!(
                    request_id,
                    expected = amount,
                    stored = stored_amount,
                    "Amount mismatch on post-approval read-back"
                );
            }
        }
        Ok(None) => {
            tracing::error!(request_id, "Approved request missing on read-back");
        }
        Err(err) => {
            tracing::error!(request_id, error = %err, "Post-approval read-back failed");
        }
    }
}

async fn try_send_approval(
    state: &AppState,
    to: &str,
    plate_number: &str,
    slot: &ParkingSlot,
) -> Result<(), ()> {
    let Some(mailer) = &state.mailer else {
        tracing::warn!(to, "SMTP not configured; approval email reported as failed");
        return Err(());
    };
    mailer
        .send_approval(to, plate_number, &slot.slot_number, &slot.location)
        .await
        .map_err(|err| {
            tracing::error!(to, error = %err, "Approval email delivery failed");
        })
}

async fn try_send_payment(
    state: &AppState,
    to: &str,
    plate_number: &str,
    slot: &ParkingSlot,
    amount: i64,
) -> Result<(), ()> {
    let Some(mailer) = &state.mailer else {
        tracing::warn!(to, "SMTP not configured; payment email reported as failed");
        return Err(());
    };
    mailer
        .send_payment_success(to, plate_number, &slot.slot_number, &slot.location, amount)
        .await
        .map_err(|err| {
            tracing::error!(to, error = %err, "Payment email delivery failed");
        })
}

async fn try_send_rejection(
    state: &AppState,
    to: &str,
    plate_number: &str,
    location: &str,
    reason: &str,
) -> Result<(), ()> {
    let Some(mailer) = &state.mailer else {
        tracing::warn!(to, "SMTP not configured; rejection email reported as failed");
        return Err(());
    };
    mailer
        .send_rejection(to, plate_number, location, reason)
        .await
        .map_err(|err| {
            tracing::error!(to, error = %err, "Rejection email delivery failed");
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(vehicle_id: Option<DbId>, entry: Option<&str>, exit: Option<&str>) -> BookingBody {
        BookingBody {
            vehicle_id,
            entry_time: entry.map(String::from),
            exit_time: exit.map(String::from),
        }
    }

    #[test]
    fn booking_computes_ceil_amount() {
        let parsed = parse_booking(&body(
            Some(1),
            Some("2025-05-20T14:00:00"),
            Some("2025-05-20T15:30:01"),
        ))
        .unwrap();
        assert_eq!(parsed.amount, 2000);
    }

    #[test]
    fn booking_requires_all_fields() {
        assert!(parse_booking(&body(None, Some("2025-05-20T14:00:00"), Some("2025-05-20T15:00:00"))).is_err());
        assert!(parse_booking(&body(Some(1), None, Some("2025-05-20T15:00:00"))).is_err());
        assert!(parse_booking(&body(Some(1), Some("2025-05-20T14:00:00"), None)).is_err());
    }

    #[test]
    fn booking_rejects_non_chronological_window() {
        let err = parse_booking(&body(
            Some(1),
            Some("2025-05-20T15:00:00"),
            Some("2025-05-20T14:00:00"),
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Core(CoreError::Validation(_))
        ));
    }

    #[test]
    fn booking_rejects_unparseable_timestamps() {
        let err = parse_booking(&body(Some(1), Some("not-a-date"), Some("2025-05-20T15:00:00")))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Core(CoreError::Validation(_))
        ));
    }
}
