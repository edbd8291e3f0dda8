//! Authentication primitives: JWT access tokens, Argon2id password hashing,
//! and one-time verification codes.

pub mod jwt;
pub mod otp;
pub mod password;
