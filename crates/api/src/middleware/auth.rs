//! JWT-based authentication extractor for Axum handlers.

use attendance_core::error::CoreError;
use attendance_core::roles::Role;
use attendance_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The login's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub role: Role,
    /// Student linked to a class representative login.
    pub student_id: Option<DbId>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let invalid = || AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()));

        let claims = validate_token(token, &state.config.jwt).map_err(|_| invalid())?;
        let role = Role::from_str_value(&claims.role).map_err(|_| invalid())?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
            student_id: claims.student_id,
        })
    }
}
