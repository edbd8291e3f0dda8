//! Handlers for registration, OTP verification, and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use parkhub_core::error::CoreError;
use parkhub_core::roles::ROLE_USER;
use parkhub_db::models::user::{NewUser, UserResponse};
use parkhub_db::repositories::UserRepo;
use parkhub_mailer::EmailStatus;

use crate::auth::jwt::generate_access_token;
use crate::auth::otp;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::record_audit;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for the register endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterBody {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Body for the verify-otp endpoint.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpBody {
    pub email: String,
    pub code: String,
}

/// Body for the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Registration result: the created account plus the OTP delivery status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutcome {
    pub user: UserResponse,
    pub otp_email_status: EmailStatus,
}

/// Login result: the access token and the authenticated account.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

fn validation_error(err: validator::ValidationErrors) -> AppError {
    AppError::Core(CoreError::Validation(err.to_string()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an unverified account and email it a one-time verification code.
/// OTP delivery is best-effort; its status is reported alongside the
/// created account.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> AppResult<(StatusCode, Json<RegisterOutcome>)> {
    body.validate().map_err(validation_error)?;

    let password_hash = hash_password(&body.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let code = otp::generate_code();
    let user = UserRepo::create(
        &state.pool,
        &NewUser {
            name: body.name.trim().to_string(),
            email: body.email.trim().to_lowercase(),
            password_hash,
            role: ROLE_USER.to_string(),
            otp_code: code.clone(),
            otp_expires_at: otp::expiry_from_now(),
        },
    )
    .await?;

    let otp_email_status = match &state.mailer {
        Some(mailer) => match mailer.send_otp(&user.email, &code).await {
            Ok(()) => EmailStatus::Sent,
            Err(err) => {
                tracing::error!(to = %user.email, error = %err, "OTP email delivery failed");
                EmailStatus::Failed
            }
        },
        None => {
            tracing::warn!(to = %user.email, "SMTP not configured; OTP email reported as failed");
            EmailStatus::Failed
        }
    };

    record_audit(&state.pool, user.id, "User registered").await;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterOutcome {
            user: user.into(),
            otp_email_status,
        }),
    ))
}

/// POST /api/v1/auth/verify-otp
///
/// Verify a pending account with the emailed one-time code.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpBody>,
) -> AppResult<Json<serde_json::Value>> {
    // Emails are stored lowercased at registration.
    let user = UserRepo::find_by_email(&state.pool, &body.email.trim().to_lowercase())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid email or verification code".into(),
            ))
        })?;

    if user.is_verified {
        return Ok(Json(serde_json::json!({ "message": "Account already verified" })));
    }

    if !otp::code_matches(user.otp_code.as_deref(), user.otp_expires_at, body.code.trim()) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or verification code".into(),
        )));
    }

    UserRepo::mark_verified(&state.pool, user.id).await?;

    record_audit(&state.pool, user.id, "Account verified").await;

    Ok(Json(serde_json::json!({ "message": "Account verified" })))
}

/// POST /api/v1/auth/login
///
/// Exchange credentials for an access token. Unverified accounts cannot
/// log in.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> AppResult<Json<LoginResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &body.email.trim().to_lowercase())
        .await?
        .ok_or_else(invalid)?;

    let verified = verify_password(&body.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(invalid());
    }

    if !user.is_verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is not verified".into(),
        )));
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    record_audit(&state.pool, user.id, "User logged in").await;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
