//! Locking sessions with a faculty authorization key, and rotating keys.

use attendance_core::error::CoreError;
use attendance_core::types::DbId;
use attendance_core::verification::{check_authorization_key, generate_authorization_key};
use attendance_db::repositories::{AttendanceSessionRepo, FacultyRepo, TimetableRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// Body of `PUT /faculty/verify/{session_id}`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// The scheduled faculty's six-digit key.
    pub token: String,
    pub timetable_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RegenerateTokenResponse {
    pub message: &'static str,
    pub token: String,
}

/// PUT /api/faculty/verify/{session_id}
///
/// The key must belong to the faculty scheduled for the slot, even when
/// someone else taught it. Re-verifying keeps the original timestamp.
pub async fn verify_session(
    Require(user, _): Require<can::VerifySession>,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<VerifyResponse>> {
    let session = AttendanceSessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Attendance session", session_id))?;

    if session.timetable_id != input.timetable_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Session {session_id} does not belong to timetable slot {}",
            input.timetable_id
        ))));
    }

    let slot = TimetableRepo::find_by_id(&state.pool, session.timetable_id)
        .await?
        .ok_or_else(|| AppError::not_found("Timetable slot", session.timetable_id))?;
    let profile = FacultyRepo::find_by_id(&state.pool, slot.faculty_profile_id)
        .await?
        .ok_or_else(|| AppError::not_found("Faculty profile", slot.faculty_profile_id))?;

    if let Err(e) = check_authorization_key(profile.authorization_key.as_deref(), &input.token) {
        tracing::warn!(session_id, user_id = user.user_id, "Session verification rejected");
        return Err(e.into());
    }

    let session = AttendanceSessionRepo::mark_verified(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Attendance session", session_id))?;

    tracing::info!(
        session_id,
        verified_at = ?session.verified_at,
        faculty_profile_id = profile.id,
        user_id = user.user_id,
        "Attendance session verified",
    );

    Ok(Json(VerifyResponse {
        message: "Attendance verified and locked",
    }))
}

/// PUT /api/faculty/regen-token
///
/// Replace the caller's key. The old key stops working immediately.
pub async fn regenerate_token(
    Require(user, _): Require<can::RegenerateToken>,
    State(state): State<AppState>,
) -> AppResult<Json<RegenerateTokenResponse>> {
    let token = generate_authorization_key();

    let profile = FacultyRepo::replace_key_for_user(&state.pool, user.user_id, &token)
        .await?
        .ok_or_else(|| AppError::not_found("Faculty profile for user", user.user_id))?;

    tracing::info!(
        faculty_profile_id = profile.id,
        user_id = user.user_id,
        "Authorization key regenerated",
    );

    Ok(Json(RegenerateTokenResponse {
        message: "New Token Generated",
        token,
    }))
}
