//! Handlers for faculty profiles and their logins.
//!
//! A profile can exist without a login; `/admin/faculty-login` attaches one
//! later. Deleting a profile removes its login too.

use attendance_core::directory::{validate_email, validate_required};
use attendance_core::types::DbId;
use attendance_core::verification::{generate_authorization_key, validate_key_format};
use attendance_db::models::faculty::{
    CreateFacultyLogin, CreateFacultyProfile, FacultyListing, FacultyProfile,
    UpdateFacultyProfile,
};
use attendance_db::repositories::FacultyRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::{hash_new_login, LoginCreated};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// GET /api/admin/faculty
pub async fn list(
    _auth: Require<can::ViewDirectory>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FacultyListing>>> {
    Ok(Json(FacultyRepo::list(&state.pool).await?))
}

/// POST /api/admin/faculty-profile
///
/// Creates the directory entry only. A six-digit authorization key is
/// generated unless one is supplied.
pub async fn create_profile(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<CreateFacultyProfile>,
) -> AppResult<(StatusCode, Json<FacultyProfile>)> {
    validate_required("name", &input.name)?;
    validate_email(&input.email)?;

    let key = match &input.auth_key {
        Some(key) => {
            validate_key_format(key)?;
            key.clone()
        }
        None => generate_authorization_key(),
    };

    let profile = FacultyRepo::create(&state.pool, &input, &key).await?;
    tracing::info!(
        faculty_profile_id = profile.id,
        user_id = admin.user_id,
        "Faculty profile created",
    );
    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /api/admin/faculty-login
///
/// Attach a login to an existing profile. The login uses the profile's email.
pub async fn create_login(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<CreateFacultyLogin>,
) -> AppResult<(StatusCode, Json<LoginCreated>)> {
    let profile_id = input.faculty_profile_id;
    let profile = FacultyRepo::find_by_id(&state.pool, profile_id)
        .await?
        .ok_or_else(|| AppError::not_found("Faculty profile", profile_id))?;

    let password_hash = hash_new_login(&profile.email, &input.password)?;

    let user = FacultyRepo::create_login(&state.pool, profile_id, &password_hash)
        .await?
        .ok_or_else(|| AppError::not_found("Faculty profile", profile_id))?;

    tracing::info!(
        faculty_profile_id = profile_id,
        login_user_id = user.id,
        user_id = admin.user_id,
        "Faculty login created",
    );
    Ok((
        StatusCode::CREATED,
        Json(LoginCreated {
            message: "Faculty login created",
            user_id: user.id,
        }),
    ))
}

/// PUT /api/admin/faculty/{id}
pub async fn update(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFacultyProfile>,
) -> AppResult<Json<FacultyProfile>> {
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    if let Some(key) = &input.auth_key {
        validate_key_format(key)?;
    }

    let profile = FacultyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Faculty profile", id))?;
    tracing::info!(faculty_profile_id = id, user_id = admin.user_id, "Faculty profile updated");
    Ok(Json(profile))
}

/// DELETE /api/admin/faculty/{id}
///
/// Fails with 409 while timetable slots still name this faculty.
pub async fn delete(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FacultyRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Faculty profile", id));
    }
    tracing::info!(faculty_profile_id = id, user_id = admin.user_id, "Faculty profile deleted");
    Ok(StatusCode::NO_CONTENT)
}
