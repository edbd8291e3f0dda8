//! One-time codes for account verification.
//!
//! Registration stores a 6-digit code with a short expiry and emails it to
//! the new account; `verify-otp` consumes it.

use parkhub_core::types::Timestamp;
use rand::Rng;

/// OTP validity window in minutes.
pub const OTP_TTL_MINS: i64 = 5;

/// Generate a zero-padded 6-digit code.
pub fn generate_code() -> String {
    let code: u32 = rand::rng().random_range(0..1_000_000);
    format!("{code:06}")
}

/// Expiry instant for a code issued now.
pub fn expiry_from_now() -> Timestamp {
    chrono::Utc::now() + chrono::Duration::minutes(OTP_TTL_MINS)
}

/// Whether a stored code matches the submitted one and is still valid.
pub fn code_matches(
    stored: Option<&str>,
    expires_at: Option<Timestamp>,
    submitted: &str,
) -> bool {
    match (stored, expires_at) {
        (Some(code), Some(expiry)) => code == submitted && chrono::Utc::now() < expiry,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn matching_unexpired_code_verifies() {
        let expiry = chrono::Utc::now() + chrono::Duration::minutes(1);
        assert!(code_matches(Some("123456"), Some(expiry), "123456"));
    }

    #[test]
    fn wrong_code_fails() {
        let expiry = chrono::Utc::now() + chrono::Duration::minutes(1);
        assert!(!code_matches(Some("123456"), Some(expiry), "654321"));
    }

    #[test]
    fn expired_code_fails() {
        let expiry = chrono::Utc::now() - chrono::Duration::seconds(1);
        assert!(!code_matches(Some("123456"), Some(expiry), "123456"));
    }

    #[test]
    fn missing_challenge_fails() {
        assert!(!code_matches(None, None, "123456"));
    }
}
