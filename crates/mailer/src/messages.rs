//! Notification message templates and the secondary-outcome status flag.
//!
//! Each capability renders a subject plus paired plain-text and HTML bodies.
//! Rendering is separated from sending so the templates are testable without
//! a relay.

use serde::Serialize;

use crate::smtp::{Mailer, MailerError};

/// Outcome of one best-effort send, reported back to API callers alongside
/// the primary result. Never escalates to a request failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Failed,
}

/// A rendered email ready to hand to the transport.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Approval notice: the request was granted and a slot assigned.
pub fn approval(plate_number: &str, slot_number: &str, location: &str) -> Rendered {
    Rendered {
        subject: "Parking Slot Approval".to_string(),
        text: format!(
            "Your parking slot request for vehicle {plate_number} has been approved. \
             Assigned slot: {slot_number}. Location: {location}."
        ),
        html: format!(
            "<h2>Parking Slot Approval</h2>\
             <p>Your parking slot request for vehicle <strong>{plate_number}</strong> \
             has been approved.</p>\
             <p><strong>Assigned Slot:</strong> {slot_number}</p>\
             <p><strong>Location:</strong> {location}</p>"
        ),
    }
}

/// Rejection notice, with the administrator's reason.
pub fn rejection(plate_number: &str, location: &str, reason: &str) -> Rendered {
    Rendered {
        subject: "Parking Slot Request Rejected".to_string(),
        text: format!(
            "Your parking slot request for vehicle {plate_number} at {location} \
             has been rejected. Reason: {reason}."
        ),
        html: format!(
            "<h2>Parking Slot Request Rejected</h2>\
             <p>Your parking slot request for vehicle <strong>{plate_number}</strong> \
             at <strong>{location}</strong> has been rejected.</p>\
             <p><strong>Reason:</strong> {reason}</p>"
        ),
    }
}

/// Payment confirmation sent alongside the approval notice.
pub fn payment_success(
    plate_number: &str,
    slot_number: &str,
    location: &str,
    amount: i64,
) -> Rendered {
    Rendered {
        subject: "Parking Payment Successful".to_string(),
        text: format!(
            "Your payment of {amount} for parking slot {slot_number} at {location} \
             for vehicle {plate_number} has been processed successfully. \
             You may now enter the parking area."
        ),
        html: format!(
            "<h2>Parking Payment Successful</h2>\
             <p>Your payment of <strong>{amount}</strong> for parking slot \
             <strong>{slot_number}</strong> at <strong>{location}</strong> for vehicle \
             <strong>{plate_number}</strong> has been processed successfully.</p>\
             <p>You may now enter the parking area.</p>"
        ),
    }
}

/// One-time code for account verification.
pub fn otp(code: &str) -> Rendered {
    Rendered {
        subject: "Your OTP for Account Verification".to_string(),
        text: format!(
            "Your OTP code for account verification is {code}. It is valid for 5 minutes."
        ),
        html: format!(
            "<h2>Your OTP for Account Verification</h2>\
             <p>Your OTP code is <strong>{code}</strong>.</p>\
             <p>It is valid for 5 minutes.</p>"
        ),
    }
}

impl Mailer {
    /// Send an approval notice.
    pub async fn send_approval(
        &self,
        to: &str,
        plate_number: &str,
        slot_number: &str,
        location: &str,
    ) -> Result<(), MailerError> {
        let msg = approval(plate_number, slot_number, location);
        self.send(to, &msg.subject, msg.text, msg.html).await
    }

    /// Send a rejection notice.
    pub async fn send_rejection(
        &self,
        to: &str,
        plate_number: &str,
        location: &str,
        reason: &str,
    ) -> Result<(), MailerError> {
        let msg = rejection(plate_number, location, reason);
        self.send(to, &msg.subject, msg.text, msg.html).await
    }

    /// Send a payment confirmation.
    pub async fn send_payment_success(
        &self,
        to: &str,
        plate_number: &str,
        slot_number: &str,
        location: &str,
        amount: i64,
    ) -> Result<(), MailerError> {
        let msg = payment_success(plate_number, slot_number, location, amount);
        self.send(to, &msg.subject, msg.text, msg.html).await
    }

    /// Send a one-time verification code.
    pub async fn send_otp(&self, to: &str, code: &str) -> Result<(), MailerError> {
        let msg = otp(code);
        self.send(to, &msg.subject, msg.text, msg.html).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_mentions_slot_and_location() {
        let msg = approval("RAD 123 A", "B-07", "Level 2 East");
        assert_eq!(msg.subject, "Parking Slot Approval");
        assert!(msg.text.contains("RAD 123 A"));
        assert!(msg.text.contains("B-07"));
        assert!(msg.html.contains("Level 2 East"));
    }

    #[test]
    fn rejection_carries_the_reason() {
        let msg = rejection("RAD 123 A", "unknown", "No valid insurance on file");
        assert!(msg.text.contains("rejected"));
        assert!(msg.text.contains("No valid insurance on file"));
        assert!(msg.html.contains("No valid insurance on file"));
    }

    #[test]
    fn payment_states_the_amount() {
        let msg = payment_success("RAD 123 A", "B-07", "Level 2 East", 2000);
        assert!(msg.text.contains("2000"));
        assert!(msg.text.contains("enter the parking area"));
    }

    #[test]
    fn otp_contains_the_code_and_validity() {
        let msg = otp("493021");
        assert!(msg.text.contains("493021"));
        assert!(msg.text.contains("5 minutes"));
    }

    #[test]
    fn email_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EmailStatus::Sent).unwrap(), "\"sent\"");
        assert_eq!(
            serde_json::to_string(&EmailStatus::Failed).unwrap(),
            "\"failed\""
        );
    }
}
