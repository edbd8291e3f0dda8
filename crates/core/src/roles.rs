//! Role names carried in the authorization context.
//!
//! The system has exactly two roles. Admins manage slots, decide requests,
//! and read audit logs; users own vehicles and their own pending requests.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
