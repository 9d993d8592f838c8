//! Student and course lists used while marking attendance.

use attendance_core::error::CoreError;
use attendance_core::types::DbId;
use attendance_db::models::course::Course;
use attendance_db::models::student::Student;
use attendance_db::repositories::{CourseRepo, StudentRepo, UserRepo};
use axum::extract::{Path, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// GET /api/cr/students-by-timetable/{timetable_id}
///
/// Students of the section the slot belongs to, in roll-number order.
pub async fn students_by_timetable(
    _auth: Require<can::ViewSectionRoster>,
    State(state): State<AppState>,
    Path(timetable_id): Path<DbId>,
) -> AppResult<Json<Vec<Student>>> {
    let students = StudentRepo::list_by_timetable(&state.pool, timetable_id).await?;
    Ok(Json(students))
}

/// GET /api/cr/students-by-studentid
///
/// Students of the caller's own section, found through the student linked
/// to the login.
pub async fn students_by_student(
    Require(user, _): Require<can::ViewSectionRoster>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Student>>> {
    let student_id = user.student_id.ok_or_else(|| {
        AppError::Core(CoreError::Forbidden(
            "No student is linked to this login".into(),
        ))
    })?;

    let student = StudentRepo::find_by_id(&state.pool, student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", student_id))?;

    let students = StudentRepo::list_by_section(&state.pool, student.section_id).await?;
    Ok(Json(students))
}

/// GET /api/cr/my-courses
///
/// Distinct courses timetabled for the CR's section, in any semester.
pub async fn my_courses(
    Require(user, _): Require<can::ViewOwnCourses>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Course>>> {
    let ctx = UserRepo::cr_context(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("CR login", user.user_id))?;

    let courses = CourseRepo::list_for_section(&state.pool, ctx.section_id).await?;
    Ok(Json(courses))
}
