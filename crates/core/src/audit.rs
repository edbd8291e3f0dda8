//! Audit trail conventions.
//!
//! Every mutating operation appends a one-line action description to the
//! `logs` table. The sink is fire-and-forget: append failures are logged
//! server-side and never propagate to the caller. Action text is capped at
//! the column width; truncation must not split a multi-byte character.

/// Maximum stored length of an audit action, in bytes (column width).
pub const MAX_ACTION_LEN: usize = 100;

/// Truncate an action description to [`MAX_ACTION_LEN`] bytes on a char
/// boundary.
pub fn truncate_action(action: &str) -> String {
    if action.len() <= MAX_ACTION_LEN {
        return action.to_string();
    }
    let mut end = MAX_ACTION_LEN;
    while !action.is_char_boundary(end) {
        end -= 1;
    }
    action[..end].to_string()
}
