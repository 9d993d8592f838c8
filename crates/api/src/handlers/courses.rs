//! Handlers for `/admin/courses`. Courses are addressed by code.

use attendance_core::directory::validate_required;
use attendance_core::error::CoreError;
use attendance_db::models::course::{Course, CreateCourse, UpdateCourse};
use attendance_db::repositories::CourseRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

fn course_not_found(code: &str) -> AppError {
    AppError::Core(CoreError::NotFoundByCode {
        entity: "Course",
        code: code.to_string(),
    })
}

fn validate_credits(credits: i32) -> AppResult<()> {
    if credits < 0 {
        return Err(AppError::BadRequest("credits must not be negative".into()));
    }
    Ok(())
}

/// POST /api/admin/courses
pub async fn create(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    validate_required("code", &input.code)?;
    validate_required("name", &input.name)?;
    validate_credits(input.credits)?;

    let course = CourseRepo::create(&state.pool, &input).await?;
    tracing::info!(course_code = %course.course_code, user_id = admin.user_id, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/admin/courses
pub async fn list(
    _auth: Require<can::ViewDirectory>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Course>>> {
    Ok(Json(CourseRepo::list(&state.pool).await?))
}

/// PUT /api/admin/courses/{code}
pub async fn update(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<Course>> {
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    if let Some(credits) = input.credits {
        validate_credits(credits)?;
    }

    let course = CourseRepo::update(&state.pool, &code, &input)
        .await?
        .ok_or_else(|| course_not_found(&code))?;
    tracing::info!(course_code = %code, user_id = admin.user_id, "Course updated");
    Ok(Json(course))
}

/// DELETE /api/admin/courses/{code}
///
/// Fails with 409 while timetable slots or sessions reference the course.
pub async fn delete(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<StatusCode> {
    if !CourseRepo::delete(&state.pool, &code).await? {
        return Err(course_not_found(&code));
    }
    tracing::info!(course_code = %code, user_id = admin.user_id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}
