//! Outbound email for ParkHub: the notification dispatcher.
//!
//! Four capabilities (approval, rejection, payment-success, OTP), each
//! rendered as plain text plus HTML and handed to the SMTP transport exactly
//! once. There is no retry and no queue; a failure propagates to the caller,
//! who records it as an [`EmailStatus`] flag and moves on -- delivery is a
//! best-effort side channel that never blocks or reverses a state
//! transition.

pub mod messages;
pub mod smtp;

pub use messages::EmailStatus;
pub use smtp::{EmailConfig, Mailer, MailerError};
