//! Handlers for the `/auth` resource, plus the startup admin bootstrap.

use attendance_core::error::CoreError;
use attendance_core::roles::ROLE_ADMIN;
use attendance_db::models::user::{CreateUser, LoginRequest};
use attendance_db::repositories::UserRepo;
use attendance_db::DbPool;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// POST /api/login
///
/// Authenticate with email + password. Unknown email and wrong password are
/// indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    let token = generate_token(user.id, &user.role, user.student_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        role: user.role,
        expires_in: state.config.jwt.expiry_secs(),
    }))
}

/// Create the configured admin login unless one with that email exists.
///
/// Returns `true` when a login was created.
pub async fn ensure_bootstrap_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    if UserRepo::find_by_email(pool, &admin.email).await?.is_some() {
        return Ok(false);
    }

    let password_hash = super::hash_new_login(&admin.email, &admin.password)?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
            student_id: None,
            semester: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
    Ok(true)
}
