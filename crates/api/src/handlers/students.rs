//! Handlers for students and class representative logins.

use attendance_core::directory::{
    validate_email, validate_required, validate_semester, DEFAULT_CR_SEMESTER,
};
use attendance_core::roles::ROLE_CR;
use attendance_core::types::DbId;
use attendance_db::models::student::{
    CreateStudent, PromoteCr, Student, StudentFilterRow, StudentListing, UpdateStudent,
};
use attendance_db::models::user::CreateUser;
use attendance_db::repositories::{StudentRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::{hash_new_login, LoginCreated};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// Query parameters for `GET /admin/students-by-filter`.
#[derive(Debug, Deserialize)]
pub struct StudentFilterParams {
    pub section_id: Option<DbId>,
    pub semester: Option<i32>,
}

/// POST /api/admin/students
pub async fn create(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    validate_required("roll", &input.roll)?;
    validate_required("name", &input.name)?;
    validate_email(&input.email)?;

    let student = StudentRepo::create(&state.pool, &input).await?;
    tracing::info!(student_id = student.id, user_id = admin.user_id, "Student created");
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/admin/students
pub async fn list(
    _auth: Require<can::ViewDirectory>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StudentListing>>> {
    Ok(Json(StudentRepo::list(&state.pool).await?))
}

/// PUT /api/admin/students/{id}
pub async fn update(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    if let Some(roll) = &input.roll {
        validate_required("roll", roll)?;
    }
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }

    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Student", id))?;
    tracing::info!(student_id = id, user_id = admin.user_id, "Student updated");
    Ok(Json(student))
}

/// DELETE /api/admin/students/{id}
///
/// Cascades to the student's attendance records and CR login.
pub async fn delete(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Student", id));
    }
    tracing::info!(student_id = id, user_id = admin.user_id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/students-by-filter?section_id=..&semester=..
///
/// Students of one section, each with any CR login they hold. With a
/// semester, only sections timetabled in that semester match.
pub async fn filter(
    _auth: Require<can::ViewDirectory>,
    State(state): State<AppState>,
    Query(params): Query<StudentFilterParams>,
) -> AppResult<Json<Vec<StudentFilterRow>>> {
    let section_id = params
        .section_id
        .ok_or_else(|| AppError::BadRequest("section_id is required".into()))?;

    let rows = StudentRepo::filter(&state.pool, section_id, params.semester).await?;
    Ok(Json(rows))
}

/// POST /api/admin/promote-cr
///
/// Create a class representative login for a student, using the student's
/// email. A student holds at most one login.
pub async fn promote_cr(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<PromoteCr>,
) -> AppResult<(StatusCode, Json<LoginCreated>)> {
    let student = StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", input.student_id))?;

    let semester = input.semester.unwrap_or(DEFAULT_CR_SEMESTER);
    validate_semester(semester)?;

    let password_hash = hash_new_login(&student.email, &input.password)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: student.email,
            password_hash,
            role: ROLE_CR.to_string(),
            student_id: Some(student.id),
            semester: Some(semester),
        },
    )
    .await?;

    tracing::info!(
        student_id = student.id,
        login_user_id = user.id,
        semester,
        user_id = admin.user_id,
        "Student promoted to CR",
    );
    Ok((
        StatusCode::CREATED,
        Json(LoginCreated {
            message: "Student promoted to CR",
            user_id: user.id,
        }),
    ))
}

/// DELETE /api/admin/demote-cr/{student_id}
///
/// Remove the student's CR login. Sessions it recorded keep their data.
pub async fn demote_cr(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UserRepo::delete_cr_for_student(&state.pool, student_id).await? {
        return Err(AppError::not_found("CR login for student", student_id));
    }
    tracing::info!(student_id, user_id = admin.user_id, "CR login removed");
    Ok(StatusCode::NO_CONTENT)
}
