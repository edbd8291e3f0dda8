//! Lifecycle status constants for slot requests and parking slots.
//!
//! A request moves `pending -> approved` or `pending -> rejected`, never the
//! reverse; terminal states are final. A slot flips `available ->
//! unavailable` only inside the same transaction that approves the request
//! holding it.

pub const REQUEST_PENDING: &str = "pending";
pub const REQUEST_APPROVED: &str = "approved";
pub const REQUEST_REJECTED: &str = "rejected";

pub const SLOT_AVAILABLE: &str = "available";
pub const SLOT_UNAVAILABLE: &str = "unavailable";
