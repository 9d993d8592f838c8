//! Handlers for timetable slots.

use attendance_core::calendar::validate_day;
use attendance_core::directory::{validate_slot, validate_slot_number, DEFAULT_CR_SEMESTER};
use attendance_core::error::CoreError;
use attendance_core::types::DbId;
use attendance_db::models::timetable::{
    CreateTimetableSlot, TimetableSlot, TimetableSlotView, UpdateTimetableSlot,
};
use attendance_db::repositories::{TimetableRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// Query parameters for `GET /common/timetable`.
#[derive(Debug, Deserialize)]
pub struct TimetableParams {
    pub section_id: DbId,
    pub semester: i32,
}

/// Query parameters for `GET /common/timetable-by-class`.
///
/// Missing values are taken from the caller's CR login.
#[derive(Debug, Deserialize)]
pub struct ClassTimetableParams {
    pub section_id: Option<DbId>,
    pub semester: Option<i32>,
}

/// POST /api/admin/timetable
///
/// One slot per (section, semester, day, slot number); a second one is 409.
pub async fn create(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<CreateTimetableSlot>,
) -> AppResult<(StatusCode, Json<TimetableSlot>)> {
    validate_slot(input.semester, &input.day, input.slot_number)?;

    let slot = TimetableRepo::create(&state.pool, &input).await?;
    tracing::info!(
        timetable_id = slot.id,
        section_id = slot.section_id,
        user_id = admin.user_id,
        "Timetable slot created",
    );
    Ok((StatusCode::CREATED, Json(slot)))
}

/// PUT /api/admin/timetable/{id}
pub async fn update(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimetableSlot>,
) -> AppResult<Json<TimetableSlot>> {
    if let Some(day) = &input.day {
        validate_day(day)?;
    }
    if let Some(slot_number) = input.slot_number {
        validate_slot_number(slot_number)?;
    }

    let slot = TimetableRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Timetable slot", id))?;
    tracing::info!(timetable_id = id, user_id = admin.user_id, "Timetable slot updated");
    Ok(Json(slot))
}

/// DELETE /api/admin/timetable/{id}
///
/// Cascades to the slot's sessions, records, and swap log entries.
pub async fn delete(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TimetableRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Timetable slot", id));
    }
    tracing::info!(timetable_id = id, user_id = admin.user_id, "Timetable slot deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/common/timetable?section_id=..&semester=..
pub async fn for_section(
    _auth: Require<can::ViewDirectory>,
    State(state): State<AppState>,
    Query(params): Query<TimetableParams>,
) -> AppResult<Json<Vec<TimetableSlotView>>> {
    let slots =
        TimetableRepo::list_for_section(&state.pool, params.section_id, params.semester).await?;
    Ok(Json(slots))
}

/// GET /api/common/timetable-by-class
///
/// A CR may omit either parameter to use their own section and semester.
/// Other callers must supply both.
pub async fn by_class(
    Require(user, _): Require<can::ViewDirectory>,
    State(state): State<AppState>,
    Query(params): Query<ClassTimetableParams>,
) -> AppResult<Json<Vec<TimetableSlotView>>> {
    let (section_id, semester) = match (params.section_id, params.semester) {
        (Some(section_id), Some(semester)) => (section_id, semester),
        (section_id, semester) => {
            if user.student_id.is_none() {
                return Err(AppError::Core(CoreError::Forbidden(
                    "section_id and semester are required for non-CR logins".into(),
                )));
            }
            let ctx = UserRepo::cr_context(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("CR login", user.user_id))?;
            (
                section_id.unwrap_or(ctx.section_id),
                semester.unwrap_or(ctx.semester.unwrap_or(DEFAULT_CR_SEMESTER)),
            )
        }
    };

    let slots = TimetableRepo::list_for_section(&state.pool, section_id, semester).await?;
    Ok(Json(slots))
}
