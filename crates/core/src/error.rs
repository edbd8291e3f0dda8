//! Domain error taxonomy.
//!
//! Every fallible domain operation returns one of these variants; the HTTP
//! layer maps them onto status codes in `parkhub-api`. Transport (email) and
//! audit-sink failures are deliberately NOT represented here: by contract
//! they reduce to status flags and never fail the surrounding operation.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Entity missing, not owned by the caller, or not in the required state.
    /// The three cases are indistinguishable on the wire to avoid leaking
    /// other users' data.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No parking slot matches the requesting vehicle's type and size with
    /// status `available`. The request stays `pending`.
    #[error("No capacity: {0}")]
    NoCapacity(String),

    /// Reference data failed a defensive check (e.g. a slot row with a blank
    /// slot number). Indicates corrupt data, not caller error.
    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
