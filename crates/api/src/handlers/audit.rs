//! Admin views of what was recorded for a slot.

use attendance_core::types::DbId;
use attendance_db::models::attendance::{RecordDetail, SessionAuditRow};
use attendance_db::models::class_swap::ClassSwap;
use attendance_db::repositories::{AttendanceRecordRepo, AttendanceSessionRepo, ClassSwapRepo};
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// GET /api/admin/sessions-by-timetable/{timetable_id}
///
/// Newest first, with the recorder's email.
pub async fn sessions_by_timetable(
    _auth: Require<can::AuditSessions>,
    State(state): State<AppState>,
    Path(timetable_id): Path<DbId>,
) -> AppResult<Json<Vec<SessionAuditRow>>> {
    let sessions = AttendanceSessionRepo::list_for_timetable(&state.pool, timetable_id).await?;
    Ok(Json(sessions))
}

/// GET /api/admin/records-by-session/{session_id}
pub async fn records_by_session(
    _auth: Require<can::AuditSessions>,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<Json<Vec<RecordDetail>>> {
    let records = AttendanceRecordRepo::details_by_session(&state.pool, session_id).await?;
    Ok(Json(records))
}

/// GET /api/admin/swaps-by-timetable/{timetable_id}
pub async fn swaps_by_timetable(
    _auth: Require<can::AuditSessions>,
    State(state): State<AppState>,
    Path(timetable_id): Path<DbId>,
) -> AppResult<Json<Vec<ClassSwap>>> {
    let swaps = ClassSwapRepo::list_for_timetable(&state.pool, timetable_id).await?;
    Ok(Json(swaps))
}
