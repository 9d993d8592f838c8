//! Recording attendance for a timetable slot.
//!
//! The submission is classified against the slot's scheduled course:
//!
//! - **normal** -- the scheduled course was taught.
//! - **swap** -- another course was taught; a swap log entry records who
//!   most likely taught it.
//! - **free** -- no class was held; no records are stored.
//!
//! The session, its records, and any swap log entry are written in one
//! transaction by [`AttendanceSessionRepo::record`].

use attendance_core::attendance::{
    check_recording_scope, classify, normalize_records, RecordAttendanceRequest,
};
use attendance_core::error::CoreError;
use attendance_core::roles::Role;
use attendance_core::types::DbId;
use attendance_db::models::attendance::NewSession;
use attendance_db::repositories::{
    AttendanceSessionRepo, CourseRepo, StudentRepo, TimetableRepo, UserRepo,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// Response for a recorded session.
#[derive(Debug, Serialize)]
pub struct RecordAttendanceResponse {
    pub message: &'static str,
    #[serde(rename = "sessionId")]
    pub session_id: DbId,
    pub category: &'static str,
}

/// POST /api/cr/attendance
///
/// At most one session per slot and date; a second submission is 409 and
/// leaves the first untouched.
pub async fn record(
    Require(user, _): Require<can::RecordAttendance>,
    State(state): State<AppState>,
    Json(input): Json<RecordAttendanceRequest>,
) -> AppResult<(StatusCode, Json<RecordAttendanceResponse>)> {
    let slot = TimetableRepo::find_by_id(&state.pool, input.timetable_id)
        .await?
        .ok_or_else(|| AppError::not_found("Timetable slot", input.timetable_id))?;

    let recorder_section = recorder_section(&state, &user).await?;
    check_recording_scope(user.role, recorder_section, slot.section_id)?;

    let classification = classify(
        &slot.course_code,
        input.selected_course_code.as_deref(),
        input.is_free,
    )?;
    let records = normalize_records(classification.category, &input.records)?;

    if let Some(code) = classification.actual_course_code.as_deref() {
        if CourseRepo::find_by_code(&state.pool, code).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown course code '{code}'"
            ))));
        }
    }

    if !records.is_empty() {
        let ids: Vec<DbId> = records.iter().map(|r| r.student_id).collect();
        let outside = StudentRepo::find_outside_section(&state.pool, slot.section_id, &ids).await?;
        if let Some(&student_id) = outside.first() {
            return Err(AppError::not_found("Student in this section", student_id));
        }
    }

    let category = classification.category;
    let new_session = NewSession {
        timetable_id: slot.id,
        session_date: input.date,
        marked_by_user_id: user.user_id,
        classification,
        records,
        section_id: slot.section_id,
        scheduled_course_code: slot.course_code,
        scheduled_faculty_id: slot.faculty_profile_id,
        recorder_faculty_user_id: (user.role == Role::Faculty).then_some(user.user_id),
    };

    let session = AttendanceSessionRepo::record(&state.pool, &new_session).await?;

    tracing::info!(
        session_id = session.id,
        timetable_id = session.timetable_id,
        date = %session.session_date,
        category = category.as_str(),
        records = new_session.records.len(),
        user_id = user.user_id,
        "Attendance recorded",
    );

    Ok((
        StatusCode::CREATED,
        Json(RecordAttendanceResponse {
            message: "Attendance recorded",
            session_id: session.id,
            category: category.as_str(),
        }),
    ))
}

/// Section a class representative belongs to; `None` for other roles.
async fn recorder_section(state: &AppState, user: &AuthUser) -> AppResult<Option<DbId>> {
    if user.role != Role::Cr {
        return Ok(None);
    }
    let ctx = UserRepo::cr_context(&state.pool, user.user_id).await?;
    Ok(ctx.map(|c| c.section_id))
}
