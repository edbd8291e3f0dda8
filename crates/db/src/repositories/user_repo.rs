//! Repository for the `users` table.

use parkhub_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{NewUser, User, UserResponse};

/// Column list for users queries.
const COLUMNS: &str = "id, name, email, password_hash, role, is_verified, \
    otp_code, otp_expires_at, created_at";

/// Column list safe for API-facing listings (no credentials).
const PUBLIC_COLUMNS: &str = "id, name, email, role, is_verified, created_at";

/// Provides account operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new unverified user with a pending OTP challenge.
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, otp_code, otp_expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.otp_code)
            .bind(input.otp_expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a user by email (login and OTP verification lookups).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a user verified and clear the OTP challenge.
    pub async fn mark_verified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_verified = TRUE, otp_code = NULL, otp_expires_at = NULL
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a user's OTP challenge (re-send flow).
    pub async fn store_otp(
        pool: &PgPool,
        id: DbId,
        otp_code: &str,
        expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET otp_code = $1, otp_expires_at = $2 WHERE id = $3",
        )
        .bind(otp_code)
        .bind(expires_at)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a page of users matching a name or email search (admin view).
    pub async fn list_page(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS} FROM users
             WHERE name ILIKE $1 OR email ILIKE $1
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count users matching a listing filter.
    pub async fn count(pool: &PgPool, pattern: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM users WHERE name ILIKE $1 OR email ILIKE $1",
        )
        .bind(pattern)
        .fetch_one(pool)
        .await
    }
}
